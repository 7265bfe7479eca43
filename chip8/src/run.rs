use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{debug, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::{Beeper, Screen};
use vip8::constants::KEY_COUNT;
use vip8::{Chip8, CycleResult, LogSink, Quirks, TraceSink};

use crate::keymap::keymap;

pub const DEFAULT_IPS: u32 = 300;

/// How often a held key is pressed again.
/// Key checks consume presses, so holding a key has to keep re-pressing it.
const KEY_REPEAT: Duration = Duration::from_millis(200);

/// Shortest tone played for a beep
const BEEP_LENGTH: Duration = Duration::from_millis(100);

pub struct Config {
    pub rom: PathBuf,
    pub ips: u32,
    pub scale: u32,
    pub trace: bool,
    pub quirks: Quirks,
    pub seed: Option<u64>,
}

/// Forwards cycles to the log while enabled
struct Tracer {
    enabled: bool,
    log: LogSink,
}

impl TraceSink for Tracer {
    fn record(&mut self, cycle: &CycleResult) {
        if self.enabled {
            self.log.record(cycle);
        }
    }
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let mut builder = Chip8::builder().quirks(config.quirks);
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let mut chip8 = builder
        .trace(Tracer {
            enabled: config.trace,
            log: LogSink,
        })
        .build();

    // Load ROM
    let rom = std::fs::read(&config.rom)
        .with_context(|| format!("unable to read ROM {}", config.rom.display()))?;
    chip8.load_rom(&rom)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let title = match config.rom.file_name() {
        Some(name) => format!("vip8 - {}", name.to_string_lossy()),
        None => "vip8".to_string(),
    };
    let mut screen = Screen::new(&sdl, &title, config.scale)?;
    let mut beeper = match Beeper::new(&sdl) {
        Ok(beeper) => Some(beeper),
        Err(e) => {
            warn!("no sound: {}", e);
            None
        }
    };
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;
    screen.render(&chip8.frame_buffer())?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / config.ips;
    let mut last_cycle = Instant::now();
    let mut held: [Option<Instant>; KEY_COUNT] = [None; KEY_COUNT];
    let mut beep_until = last_cycle;

    'event: loop {
        let now = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::T),
                    repeat: false,
                    ..
                } => {
                    let tracer = chip8.trace_sink_mut();
                    tracer.enabled = !tracer.enabled;
                    info!("trace {}", if tracer.enabled { "on" } else { "off" });
                }
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.set_key(kc, true);
                        held[kc as usize] = Some(now);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.set_key(kc, false);
                        held[kc as usize] = None;
                    }
                }
                _ => continue,
            };
        }

        for (kc, pressed_at) in held.iter_mut().enumerate() {
            if let Some(at) = pressed_at {
                if now.duration_since(*at) >= KEY_REPEAT {
                    chip8.set_key(kc as u8, true);
                    *pressed_at = Some(now);
                }
            }
        }

        // Update state
        chip8.step_at(now).context("emulation stopped")?;

        if let Some(frame) = chip8.get_frame() {
            screen.render(&frame)?;
        }

        if chip8.poll_beep() {
            debug!("beep");
            beep_until = now + BEEP_LENGTH;
        }
        if let Some(beeper) = beeper.as_mut() {
            beeper.set(chip8.sound_active() || now < beep_until);
        }

        // Handle timing
        let elapsed_cycle_time = Instant::now() - last_cycle;
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("quitting");
    Ok(())
}
