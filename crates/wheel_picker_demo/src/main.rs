//! Demo app for `egui_wheel_picker`.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![expect(clippy::print_stdout)]
#![expect(clippy::print_stderr)]
#![expect(clippy::exit)]

use wheel_picker_demo::{DemoApp, DemoConfig, metadata};

type DynError = Box<dyn std::error::Error>;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = DemoConfig::from_env();

    let arg_strings: Vec<_> = std::env::args().skip(1).collect();
    let args: Vec<_> = arg_strings.iter().map(String::as_str).collect();

    let printed = match args.as_slice() {
        [] => return run(config),
        ["-h"] | ["--help"] => {
            print_help();
            Ok(())
        }
        ["--metadata"] => print_metadata(&config),
        ["--sitemap"] => print_sitemap(&config),
        c => Err(format!("Invalid arguments {c:?}. Try --help").into()),
    };

    if let Err(err) = printed {
        eprintln!("{err}");
        std::process::exit(-1);
    }
    Ok(())
}

fn run(config: DemoConfig) -> eframe::Result {
    eframe::run_native(
        metadata::TITLE,
        config.native_options(),
        Box::new(move |cc| Ok(Box::new(DemoApp::new(cc, &config)))),
    )
}

fn print_metadata(config: &DemoConfig) -> Result<(), DynError> {
    let base = config.base_url()?;
    let preview = metadata::link_preview(&metadata::PageMeta::home(), &base)?;
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

fn print_sitemap(config: &DemoConfig) -> Result<(), DynError> {
    let base = config.base_url()?;
    let entries = metadata::sitemap(&base, chrono::Utc::now())?;
    print!("{}", metadata::sitemap_xml(&entries));
    Ok(())
}

fn print_help() {
    let help = "
    wheel_picker_demo

    Runs the demo app when started without arguments.

    Options
    --metadata: print the link-preview metadata as JSON and exit
    --sitemap: print the sitemap as XML and exit
    -h, --help: print help and exit

    Environment
    PUBLIC_URL: where the demo is hosted (needed by --metadata and --sitemap)
    WHEEL_PICKER_YEAR_SPAN: how many years back the year wheel goes (default 25)
    WHEEL_PICKER_TODAY: pretend today is this YYYY-MM-DD date
    RUST_LOG: log filter, e.g. `debug`
        ";
    println!("{help}");
}
