use anyhow::Result;
use clap::Parser;

use locknload_logo::cli::{Args, Command};
use locknload_logo::renderer::TrueTypeFont;
use locknload_logo::{generate, LogoConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, source) = LogoConfig::resolve(args.config.as_deref())?;
    match source {
        Some(ref path) => eprintln!("Using config: {}", path.display()),
        None => eprintln!("Using built-in config"),
    }
    args.apply(&mut config);

    match args.command.clone().unwrap_or(Command::Generate) {
        Command::Generate => {
            let report = generate(&config, &args.generate_options())?;

            for placement in &report.layout {
                eprintln!(
                    " - {:<6} size={:<4} x={:<4} y={:<4} width={}",
                    placement.text,
                    placement.size,
                    placement.x,
                    placement.y,
                    placement.bounds.width()
                );
            }

            for path in &report.logos {
                println!("Logo saved to {}", path.display());
            }
            println!("Done!");
        }
        Command::ListFonts => {
            println!("System TrueType Fonts:");
            println!("====================\n");
            let fonts = TrueTypeFont::list_system_fonts()?;
            if fonts.is_empty() {
                println!("  No system fonts found");
            } else {
                for (i, font) in fonts.iter().enumerate() {
                    println!("  {:3}. {}", i + 1, font);
                }
                println!("\n  Total: {} fonts", fonts.len());
            }
            println!("\nSet `font_family: \"Font Name\"` in logo.yaml to use one of these.");
        }
        Command::ShowConfig => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}
