use crate::util::build_library;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub(super) struct PatternsArgs {
    /// Extra pattern to register, as NAME=FILE with the file in RLE format; may be repeated
    #[arg(short, long)]
    pattern: Vec<String>,

    /// Also print every distinct orientation, not only the canonical one
    #[arg(short, long)]
    all: bool,
}

pub(super) fn run_patterns(args: PatternsArgs) -> Result<()> {
    let library = build_library(&args.pattern)?;
    for entry in library.entries() {
        let mask = entry.canonical();
        println!(
            "{} ({}x{}, population {}, {} variants)",
            entry.name(),
            mask.height(),
            mask.width(),
            mask.population(),
            entry.variants().len()
        );
        if args.all {
            for (i, variant) in entry.variants().iter().enumerate() {
                println!("#{i}");
                print!("{variant}");
            }
        } else {
            print!("{mask}");
        }
        println!();
    }
    Ok(())
}
