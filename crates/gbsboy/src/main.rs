use anyhow::{Context, Result};
use gbsboy::Options;

const USAGE: &str = "Usage: gbsboy [--dump] <file.gbs> [song]\n\
                     \n\
                     Commands (one per line on stdin):\n  \
                     n | next        next song\n  \
                     p | prev        previous song\n  \
                     a | restart     restart the selected song\n  \
                     s | song <N>    play song N\n  \
                     w | wait [N]    let N frames pass\n  \
                     q | quit        exit";

fn main() -> Result<()> {
    env_logger::init();

    let mut options = Options::default();
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dump" => options.dump = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let Some(gbs_path) = positional.next() else {
        eprintln!("No GBS path provided.\n\n{USAGE}");
        std::process::exit(1);
    };
    if let Some(song) = positional.next() {
        let song = song
            .parse::<u8>()
            .with_context(|| format!("Invalid song number '{song}'"))?;
        options.start_song = Some(song);
    }

    log::info!("Playing GBS path: '{}'", gbs_path);
    let data = std::fs::read(&gbs_path).with_context(|| format!("Failed to read '{gbs_path}'"))?;

    let stdin = std::io::stdin();
    gbsboy::run(&data, &options, stdin.lock(), std::io::stdout())?;
    Ok(())
}
