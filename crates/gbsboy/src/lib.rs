use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use gbsboy_common::{App, Key};
use gbsboy_core::boot::{BOOT_ENTRY, TIMER_VECTOR};
use gbsboy_core::{GbsApp, GbsFile, PlayerConfig};

#[derive(Clone, Debug, Default)]
pub struct Options {
    /// 1-based song to start with instead of the header's choice.
    pub start_song: Option<u8>,
    /// Print the synthesised vectors and registers after boot.
    pub dump: bool,
}

/// One line of terminal input.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Next,
    Previous,
    Restart,
    /// Jump to a 1-based song number.
    Play(u8),
    /// Let `n` frames pass with nothing pressed.
    Wait(u16),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()? {
            "n" | "next" => Command::Next,
            "p" | "prev" | "previous" => Command::Previous,
            "a" | "restart" => Command::Restart,
            "s" | "song" => Command::Play(words.next()?.parse().ok()?),
            "w" | "wait" => Command::Wait(words.next().map_or(Some(1), |n| n.parse().ok())?),
            "q" | "quit" | "exit" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Tap a key: down for one frame, up for the next.
fn tap(app: &mut GbsApp, key: Key) {
    app.handle_key_event(key, true);
    app.update();
    app.handle_key_event(key, false);
    app.update();
}

fn print_screen(app: &GbsApp, out: &mut impl Write) -> Result<()> {
    for line in app.console.lines() {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_dump(app: &GbsApp, out: &mut impl Write) -> Result<()> {
    let machine = &app.machine;
    for slot in 0..8u16 {
        let vector = slot * 8;
        writeln!(out, "RST {:#04X}: {}", vector, hex(machine.memory_range(vector, 3)))?;
    }
    writeln!(out, "INT $50: {}", hex(machine.memory_range(TIMER_VECTOR, 4)))?;
    writeln!(out, "entry:   {}", hex(machine.memory_range(BOOT_ENTRY, 4)))?;

    let regs = &machine.regs;
    writeln!(
        out,
        "AF={:04X} SP={:04X} PC={:04X} IME={} double_speed={}",
        regs.af(),
        regs.sp,
        regs.pc,
        machine.ime,
        machine.double_speed(),
    )?;
    if let Some(timer) = app.session().timer() {
        writeln!(
            out,
            "TMA={} TAC={:#04X} play rate {:.2} Hz",
            timer.modulo,
            timer.control,
            timer.play_rate_hz()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Boot `gbs_data` and drive it from line commands until `input` ends or a
/// quit command arrives.
pub fn run(
    gbs_data: &[u8],
    options: &Options,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<GbsApp> {
    let file = GbsFile::parse(gbs_data).context("Failed to parse GBS data")?;
    let mut app = GbsApp::new(&file, PlayerConfig::default());
    app.init();

    if let Some(song) = options.start_song {
        app.play(song.saturating_sub(1));
    }
    if options.dump {
        print_dump(&app, &mut out)?;
    }
    print_screen(&app, &mut out)?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                log::warn!("Unknown command '{}'", line.trim());
            }
            continue;
        };

        match command {
            Command::Next => tap(&mut app, Key::Right),
            Command::Previous => tap(&mut app, Key::Left),
            Command::Restart => tap(&mut app, Key::Return),
            Command::Play(song) => app.play(song.saturating_sub(1)),
            Command::Wait(frames) => {
                for _ in 0..frames {
                    app.update();
                }
            }
            Command::Quit => app.handle_key_event(Key::Escape, true),
        }

        if app.should_exit() {
            break;
        }
        print_screen(&app, &mut out)?;
    }

    app.exit();
    Ok(app)
}
