fn main() -> anyhow::Result<()> {
    env_logger::init();
    gamescript_rust::run()
}
