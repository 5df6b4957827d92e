use std::{env, error::Error, io, path::PathBuf, process::ExitCode};

use jdecl_declaration::{declare, DirectorySource, FileSource};

const USAGE: &str = "usage: jdecl [-cp <directory>] <class name | file.class>";

fn main() -> ExitCode {
    pretty_env_logger::init();

    let Some((class_path, class)) = parse_args(env::args().skip(1)) else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = if class.ends_with(".class") {
        declare(&FileSource::new(&class), &class, &mut out)
    } else {
        log::debug!("Class path {}", class_path.display());
        declare(&DirectorySource::new(class_path), &class, &mut out)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<(PathBuf, String)> {
    let mut class_path = None;
    let mut class = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-cp" | "-classpath" => class_path = Some(PathBuf::from(args.next()?)),
            _ if class.is_none() => class = Some(arg),
            _ => return None,
        }
    }

    let class_path = class_path.unwrap_or_else(default_class_path);
    Some((class_path, class?))
}

// First entry of CLASSPATH, or the working directory.
fn default_class_path() -> PathBuf {
    env::var_os("CLASSPATH")
        .and_then(|paths| env::split_paths(&paths).next())
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."))
}
