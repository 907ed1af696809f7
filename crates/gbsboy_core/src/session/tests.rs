use super::*;
use crate::boot::{BOOT_ENTRY, TIMER_VECTOR};
use crate::display::TextConsole;
use crate::header::tests::raw_header;
use crate::input::Buttons;
use crate::io::{Interrupts, TAC, TMA};
use crate::machine::GbsMachine;

fn header(song_count: u8, first_song: u8) -> GbsHeader {
    GbsHeader::parse(&raw_header(song_count, first_song, 0, 0)).unwrap()
}

fn booted(song_count: u8, first_song: u8) -> (PlaybackSession, GbsMachine, TextConsole) {
    let mut machine = GbsMachine::new();
    let mut console = TextConsole::new();
    let session = PlaybackSession::boot(
        header(song_count, first_song),
        PlayerConfig::default(),
        &mut machine,
        &mut console,
    );
    (session, machine, console)
}

/// Read the return address a `RET` at `sp` would pop, through the bus.
fn popped_return<B: Bus>(bus: &mut B, sp: u16) -> u16 {
    u16::from_le_bytes([bus.read8(sp), bus.read8(sp.wrapping_add(1))])
}

/// Run one frame with `held` as the raw button state.
fn tick(
    session: &mut PlaybackSession,
    machine: &mut GbsMachine,
    console: &mut TextConsole,
    held: Buttons,
) {
    let mut source = held;
    session.on_frame_tick(&mut source, machine, console);
}

#[test]
fn boot_selects_declared_first_song_and_programs_timer() {
    let (session, machine, console) = booted(3, 2);

    assert_eq!(session.selected(), 1);
    assert_eq!(machine.io(TMA), 188);
    assert_eq!(machine.io(TAC), 84);
    assert!(machine.interrupt_enable().contains(Interrupts::TIMER));
    assert_eq!(console.lines()[0], "Song 2 of 3");
    assert_eq!(
        session.timer().map(|t| (t.modulo, t.control)),
        Some((188, 84))
    );
}

#[test]
fn load_song_sets_up_init_call_for_every_song() {
    let (mut session, mut machine, mut console) = booted(5, 1);

    for index in 0..5u8 {
        machine.set_ime(true);
        machine.set_pc(0x0000);
        session.select(index);
        session.load_song(&mut machine, &mut console);

        assert_eq!(machine.regs.a, index);
        assert_eq!(machine.regs.pc, 0x0480);
        assert!(!machine.ime);
        assert_eq!(machine.regs.sp, 0xDFFD);
        let sp = machine.regs.sp;
        assert_eq!(popped_return(&mut machine, sp), BOOT_ENTRY);
    }
}

#[test]
fn call_frame_pushes_high_byte_first() {
    let mut machine = GbsMachine::new();
    SyntheticCallFrame {
        return_address: 0x1234,
    }
    .install(&mut machine, 0xE000);

    assert_eq!(machine.regs.sp, 0xDFFE);
    assert_eq!(machine.peek(0xDFFF), 0x12);
    assert_eq!(machine.peek(0xDFFE), 0x34);
    assert_eq!(popped_return(&mut machine, 0xDFFE), 0x1234);
}

#[test]
fn call_frame_wraps_at_top_of_memory() {
    // SP=0x0000 is a common choice: the first push lands at 0xFFFF.
    let mut machine = GbsMachine::new();
    SyntheticCallFrame::default().install(&mut machine, 0x0000);

    assert_eq!(machine.regs.sp, 0xFFFE);
    assert_eq!(machine.peek(0xFFFF), 0x01);
    assert_eq!(machine.peek(0xFFFE), 0x00);
    assert_eq!(popped_return(&mut machine, 0xFFFE), BOOT_ENTRY);
}

#[test]
fn previous_wraps_from_first_to_last() {
    let mut session = PlaybackSession::new(header(4, 1), PlayerConfig::default());
    assert_eq!(session.selected(), 0);
    session.select_previous();
    assert_eq!(session.selected(), 3);
    session.select_previous();
    assert_eq!(session.selected(), 2);
}

#[test]
fn next_wraps_from_last_to_first() {
    let mut session = PlaybackSession::new(header(4, 4), PlayerConfig::default());
    assert_eq!(session.selected(), 3);
    session.select_next();
    assert_eq!(session.selected(), 0);
}

#[test]
fn next_wraps_with_255_songs() {
    let mut session = PlaybackSession::new(header(255, 255), PlayerConfig::default());
    assert_eq!(session.selected(), 254);
    session.select_next();
    assert_eq!(session.selected(), 0);
}

#[test]
fn direct_selection_wraps() {
    let mut session = PlaybackSession::new(header(3, 1), PlayerConfig::default());
    session.select(2);
    assert_eq!(session.selected(), 2);
    session.select(7);
    assert_eq!(session.selected(), 1);
}

#[test]
fn tapping_right_moves_one_song_without_restarting() {
    let (mut session, mut machine, mut console) = booted(3, 1);
    machine.set_pc(0x4242);

    tick(&mut session, &mut machine, &mut console, Buttons::RIGHT);
    tick(&mut session, &mut machine, &mut console, Buttons::empty());

    assert_eq!(session.selected(), 1);
    assert_eq!(console.lines()[0], "Song 2 of 3");
    // Navigation alone leaves the running song alone.
    assert_eq!(machine.regs.pc, 0x4242);
}

#[test]
fn holding_left_auto_repeats() {
    let (mut session, mut machine, mut console) = booted(10, 1);

    // Fires on ticks 0, 14, 16 and 18.
    for _ in 0..19 {
        tick(&mut session, &mut machine, &mut console, Buttons::LEFT);
    }
    assert_eq!(session.selected(), 6);
    assert_eq!(console.lines()[0], "Song 7 of 10");
}

#[test]
fn restart_button_reloads_selected_song() {
    let (mut session, mut machine, mut console) = booted(3, 1);

    tick(&mut session, &mut machine, &mut console, Buttons::RIGHT);
    tick(&mut session, &mut machine, &mut console, Buttons::empty());
    machine.set_pc(0x4242);
    machine.set_ime(true);

    tick(&mut session, &mut machine, &mut console, Buttons::A);
    assert_eq!(machine.regs.a, 1);
    assert_eq!(machine.regs.pc, 0x0480);
    assert!(!machine.ime);

    // Holding A does not restart again.
    machine.set_pc(0x4242);
    tick(&mut session, &mut machine, &mut console, Buttons::A);
    assert_eq!(machine.regs.pc, 0x4242);
}

#[test]
fn every_tick_redraws() {
    let (mut session, mut machine, mut console) = booted(3, 1);
    let before = console.redraws();

    tick(&mut session, &mut machine, &mut console, Buttons::empty());
    assert_eq!(console.redraws(), before + 1);

    // Navigation redraws once more on top of the end-of-tick redraw.
    tick(&mut session, &mut machine, &mut console, Buttons::RIGHT);
    assert_eq!(console.redraws(), before + 3);
}

#[test]
fn custom_bindings_drive_navigation() {
    let config = PlayerConfig::builder()
        .bindings(crate::config::KeyBindings {
            previous: Buttons::L,
            next: Buttons::R,
            restart: Buttons::START,
        })
        .build();
    let mut machine = GbsMachine::new();
    let mut console = TextConsole::new();
    let mut session = PlaybackSession::boot(header(3, 1), config, &mut machine, &mut console);
    assert_eq!(session.config().bindings.next, Buttons::R);

    tick(&mut session, &mut machine, &mut console, Buttons::RIGHT);
    assert_eq!(session.selected(), 0);
    tick(&mut session, &mut machine, &mut console, Buttons::R);
    assert_eq!(session.selected(), 1);
}

#[test]
fn start_places_payload_and_vectors() {
    let mut data = raw_header(2, 1, 0x40, 0x04).to_vec();
    data.extend_from_slice(&[0xAF, 0xC9]);
    let file = GbsFile::parse(&data).unwrap();
    let mut machine = GbsMachine::new();
    let mut console = TextConsole::new();

    let session =
        PlaybackSession::start(&file, PlayerConfig::default(), &mut machine, &mut console);

    assert_eq!(machine.memory_range(0x0400, 2), &[0xAF, 0xC9]);
    assert_eq!(machine.peek(TIMER_VECTOR), 0xCD);
    assert_eq!(machine.io(TMA), 0x40);
    assert_eq!(machine.io(TAC), 0x04);
    assert_eq!(session.selected(), 0);
    assert_eq!(machine.regs.pc, 0x0480);
}

#[test]
fn forced_release_ignores_hold_until_button_is_let_go() {
    let (mut session, mut machine, mut console) = booted(5, 1);

    tick(&mut session, &mut machine, &mut console, Buttons::RIGHT);
    assert_eq!(session.selected(), 1);

    session.input_mut().force_release(Buttons::RIGHT);
    for _ in 0..20 {
        tick(&mut session, &mut machine, &mut console, Buttons::RIGHT);
    }
    assert_eq!(session.selected(), 1);
    assert!(!session.input().is_pressed(Buttons::RIGHT));

    tick(&mut session, &mut machine, &mut console, Buttons::empty());
    tick(&mut session, &mut machine, &mut console, Buttons::RIGHT);
    assert_eq!(session.selected(), 2);
}

#[test]
fn songless_header_pins_selection_at_first_slot() {
    let header = GbsHeader::read_fields(&raw_header(0, 1, 0, 0));
    let mut session = PlaybackSession::new(header, PlayerConfig::default());
    assert_eq!(session.selected(), 0);

    session.select_next();
    assert_eq!(session.selected(), 0);
    session.select_previous();
    assert_eq!(session.selected(), 0);
    session.select(7);
    assert_eq!(session.selected(), 0);

    let mut console = TextConsole::new();
    session.redraw(&mut console);
    assert_eq!(console.lines()[0], "Song 1 of 0");
}
