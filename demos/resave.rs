use std::env;
use std::time::Instant;

use svgscene::{ImportOptions, Scene, WriteOptions, XmlReader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fern::Dispatch::new()
        .format(|out, message, record|
            out.finish(format_args!("{}: {}", record.level(), message))
        ).chain(std::io::stderr()).apply()?;

    let start = Instant::now();

    let args: Vec<_> = env::args().collect();
    if args.len() < 3 {
        println!("Usage:\n\tresave in.svg out.svg [--stream]");
        std::process::exit(1);
    }

    let mut opt = ImportOptions::default();
    if args.iter().any(|a| a == "--stream") {
        opt.reader = XmlReader::Stream;
    }

    let scene = Scene::from_file(&args[1], &opt)?;
    println!("Shapes: {}", scene.len());

    scene.write_to_file(&args[2], &WriteOptions::default())?;

    println!("Elapsed: {:.4}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}
