//! # CLI Layer
//!
//! This module is **one possible host** for the scratch engine. It is the
//! **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Launches an external editor
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Context Setup**: build the API from configuration and `--dir`
//! 2. **Dispatch**: route each subcommand to a handler
//! 3. **Host duties**: edit the buffer, then close it and send `Shutdown`
//!    before the process exits
//! 4. **Output Formatting**: hand `CmdResult` messages to `render`

use super::render::{eprint_problems, print_config, print_messages, print_records};
use super::setup::{Cli, Commands, TargetArgs};
use crate::editor;
use anyhow::{Context, Result};
use clap::Parser;
use scratchapp::api::ScratchApi;
use scratchapp::commands::{Placement, Target};
use scratchapp::init::{initialize, GitResolver, InitOverrides};
use scratchapp::model::ScratchName;
use scratchapp::session::HostEvent;
use scratchapp::store::fs::FsStore;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

type Api = ScratchApi<FsStore, GitResolver>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    super::init_logger(cli.verbose);

    let ctx = initialize(InitOverrides {
        root_dir: cli.dir.clone(),
        config_dir: None,
    })
    .context("Failed to initialize scratch")?;
    let mut api = ctx.api;
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let command = cli.command.unwrap_or(Commands::Open {
        target: TargetArgs::default(),
        discard: false,
    });

    match command {
        Commands::Open { target, discard } => open(&mut api, to_target(&target, &cwd)?, discard),
        Commands::Show { target } => show(&mut api, to_target(&target, &cwd)?),
        Commands::Write { target, append } => write(&mut api, to_target(&target, &cwd)?, append),
        Commands::List => list(&api),
        Commands::Path { target } => path(&api, to_target(&target, &cwd)?),
        Commands::Delete { name } => delete(&api, &name),
        Commands::Clear { yes } => clear(&api, yes),
        Commands::Config => {
            let root_dir = ctx.config.root_dir()?;
            print_config(&ctx.config, &root_dir.display().to_string());
            Ok(())
        }
    }
}

fn to_target(args: &TargetArgs, cwd: &Path) -> Result<Target> {
    if args.project {
        return Ok(Target::Project(cwd.to_path_buf()));
    }
    match &args.name {
        Some(name) => Ok(Target::Named(name.parse::<ScratchName>()?)),
        None => Ok(Target::Default),
    }
}

fn open(api: &mut Api, target: Target, discard: bool) -> Result<()> {
    let result = api.open(target, discard, Placement::SameWindow)?;
    print_messages(&result.messages);
    let Some(opened) = result.opened else {
        return Ok(());
    };

    let (before, line) = {
        let buffer = opened.handle.borrow();
        (buffer.content().to_string(), buffer.cursor_line())
    };

    let edited = editor::edit_content(opened.name.as_str(), &before, line);
    if let Ok(after) = &edited {
        if *after != before {
            opened.handle.borrow_mut().set_content(after.as_str());
        }
    }

    // Close even when the editor failed, so a discard still gets saved.
    let closed = api.close(&opened.name)?;
    edited?;
    print_messages(&closed.messages);
    shutdown(api)
}

fn show(api: &mut Api, target: Target) -> Result<()> {
    let result = api.open(target, false, Placement::SameWindow)?;
    eprint_problems(&result.messages);
    if let Some(opened) = result.opened {
        print!("{}", opened.handle.borrow().content());
        io::stdout().flush()?;
    }
    Ok(())
}

fn write(api: &mut Api, target: Target, append: bool) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    let result = api.open(target, false, Placement::SameWindow)?;
    eprint_problems(&result.messages);
    let Some(opened) = result.opened else {
        return Ok(());
    };

    {
        let mut buffer = opened.handle.borrow_mut();
        if append {
            let end = buffer.content().chars().count();
            buffer.set_cursor(end);
            buffer.insert(&input);
        } else {
            buffer.set_content(input.as_str());
            buffer.set_cursor(input.chars().count());
        }
    }

    let closed = api.close(&opened.name)?;
    print_messages(&closed.messages);
    shutdown(api)
}

fn shutdown(api: &mut Api) -> Result<()> {
    let result = api.event(HostEvent::Shutdown)?;
    print_messages(&result.messages);
    Ok(())
}

fn list(api: &Api) -> Result<()> {
    let result = api.list()?;
    print_records(&result.records);
    print_messages(&result.messages);
    Ok(())
}

fn path(api: &Api, target: Target) -> Result<()> {
    let resolved = api.resolve(&target);
    let result = api.path(&[resolved.name])?;
    for path in &result.paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn delete(api: &Api, name: &str) -> Result<()> {
    let name: ScratchName = name.parse()?;
    let result = api.delete(&name)?;
    print_messages(&result.messages);
    Ok(())
}

fn clear(api: &Api, yes: bool) -> Result<()> {
    let result = api.clear(|paths| yes || confirm_clear(paths))?;
    print_messages(&result.messages);
    Ok(())
}

fn confirm_clear(paths: &[PathBuf]) -> bool {
    println!("This will permanently remove the following scratches:");
    for path in paths {
        let file = path.file_name().unwrap_or(path.as_os_str());
        println!("  {}", file.to_string_lossy());
    }
    print!("[Y] To delete: ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_) => input.trim() == "Y",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_target() {
        let cwd = Path::new("/work/proj");

        let args = TargetArgs::default();
        assert_eq!(to_target(&args, cwd).unwrap(), Target::Default);

        let args = TargetArgs {
            name: Some("notes".into()),
            project: false,
        };
        assert_eq!(
            to_target(&args, cwd).unwrap(),
            Target::Named(ScratchName::new("notes").unwrap())
        );

        let args = TargetArgs {
            name: None,
            project: true,
        };
        assert_eq!(
            to_target(&args, cwd).unwrap(),
            Target::Project(PathBuf::from("/work/proj"))
        );
    }

    #[test]
    fn test_to_target_rejects_bad_name() {
        let args = TargetArgs {
            name: Some("../escape".into()),
            project: false,
        };
        assert!(to_target(&args, Path::new("/")).is_err());
    }
}
