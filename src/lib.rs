pub mod cli;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use log::warn;

use processor::{Runtime, ScriptStore};

pub fn run() -> anyhow::Result<()> {
    run_with(cli::Cli::parse())
}

pub fn run_with(args: cli::Cli) -> anyhow::Result<()> {
    // 1. ── Load ───────────────────────────────────────────────────────
    let mut file = parser::load_scene(&args.scene)?;

    let mut store = ScriptStore::new();
    store.restore(&file.scripts);
    for path in &args.scripts {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        store
            .load(&src, &name)
            .with_context(|| format!("Parsing script {}", path.display()))?;
    }

    // 2. ── Play ───────────────────────────────────────────────────────
    let mut runtime = Runtime::new(store);
    let play = !args.no_play && file.scene.spawn_player();
    if !args.no_play && !play {
        warn!("no player object in scene; play mode not started");
    }

    if play {
        runtime.start(&mut file.scene);
    }
    for edit in &args.fields {
        if !runtime.update_field(&edit.script, edit.field, &edit.value, &mut file.scene) {
            warn!("no field {} in script `{}`", edit.field, edit.script);
        }
    }
    if play {
        for _ in 0..args.ticks {
            runtime.tick(&mut file.scene);
        }
        runtime.stop();
    }

    // 3. ── Write ──────────────────────────────────────────────────────
    file.scripts = runtime.store.to_records();
    writer::json::emit(&file, &args.output)
        .with_context(|| format!("Writing {}", args.output.display()))?;

    Ok(())
}
