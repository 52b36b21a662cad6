//! Sound and music data for an audio frontend.
//!
//! Notes use a compact notation: a letter `a`-`g`, an optional `#` (sharp)
//! or `-` (flat), then an octave digit `0`-`4`. `r` is a rest. Whitespace is
//! ignored, so `"c3 e3 r g3"` is four steps.

use crate::error::TrackError;

/// Highest note number: b in octave 4
pub const MAX_NOTE: u8 = 59;

/// One sound: a note per step plus per-step tone, volume and effect codes.
/// Tone, volume and effect strings shorter than the notes repeat cyclically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sound {
    pub notes: Vec<Option<u8>>,
    pub tone: String,
    pub volume: String,
    pub effect: String,
    /// Ticks per step
    pub speed: u32,
}

impl Sound {
    pub fn new(
        notes: &str,
        tone: &str,
        volume: &str,
        effect: &str,
        speed: u32,
    ) -> Result<Self, TrackError> {
        Ok(Self {
            notes: parse_notes(notes)?,
            tone: tone.to_string(),
            volume: volume.to_string(),
            effect: effect.to_string(),
            speed,
        })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Parse note notation into semitone numbers, `None` for rests
pub fn parse_notes(notation: &str) -> Result<Vec<Option<u8>>, TrackError> {
    let mut chars = notation.chars().filter(|c| !c.is_whitespace()).peekable();
    let mut notes = Vec::new();

    while let Some(c) = chars.next() {
        let base = match c.to_ascii_lowercase() {
            'r' => {
                notes.push(None);
                continue;
            }
            'c' => 0,
            'd' => 2,
            'e' => 4,
            'f' => 5,
            'g' => 7,
            'a' => 9,
            'b' => 11,
            _ => return Err(TrackError::InvalidNote(c.to_string())),
        };

        let mut text = c.to_string();
        let accidental: i16 = match chars.peek() {
            Some('#') => 1,
            Some('-') => -1,
            _ => 0,
        };
        if accidental != 0 {
            text.extend(chars.next());
        }

        let octave = match chars.next() {
            Some(d) => {
                text.push(d);
                d.to_digit(10)
                    .filter(|&o| o <= 4)
                    .ok_or_else(|| TrackError::InvalidNote(text.clone()))?
            }
            None => return Err(TrackError::InvalidNote(text)),
        };

        let note = octave as i16 * 12 + base + accidental;
        if !(0..=MAX_NOTE as i16).contains(&note) {
            return Err(TrackError::InvalidNote(text));
        }
        notes.push(Some(note as u8));
    }

    Ok(notes)
}

struct Drum {
    name: char,
    note: &'static str,
    tone: char,
    volume: char,
    effect: char,
}

const DRUM_KIT: [Drum; 5] = [
    // bass
    Drum {
        name: 'b',
        note: "f0",
        tone: 'n',
        volume: '6',
        effect: 'f',
    },
    // snare
    Drum {
        name: 's',
        note: "b3",
        tone: 'n',
        volume: '2',
        effect: 'f',
    },
    // open hat
    Drum {
        name: 'H',
        note: "b4",
        tone: 'n',
        volume: '1',
        effect: 'n',
    },
    // closed hat
    Drum {
        name: 'h',
        note: "b4",
        tone: 'n',
        volume: '1',
        effect: 'f',
    },
    // rest
    Drum {
        name: '_',
        note: "r",
        tone: 'n',
        volume: '0',
        effect: 'f',
    },
];

/// Expand a drum pattern such as `"b_s_ bbs_"` into a sound
pub fn convert_drums(pattern: &str, speed: u32) -> Result<Sound, TrackError> {
    let mut notes = String::new();
    let mut sound = Sound {
        notes: Vec::new(),
        tone: String::new(),
        volume: String::new(),
        effect: String::new(),
        speed,
    };

    for c in pattern.chars().filter(|c| *c != ' ') {
        let drum = DRUM_KIT
            .iter()
            .find(|d| d.name == c)
            .ok_or(TrackError::UnknownDrum(c))?;
        notes.push_str(drum.note);
        sound.tone.push(drum.tone);
        sound.volume.push(drum.volume);
        sound.effect.push(drum.effect);
    }

    sound.notes = parse_notes(&notes)?;
    Ok(sound)
}

/// Loop every sound's notes so all are as long as the longest.
///
/// Nothing is changed unless every length divides the longest exactly.
pub fn standardise_length(sounds: &mut [Sound]) -> Result<(), TrackError> {
    let longest = sounds
        .iter()
        .map(Sound::len)
        .max()
        .ok_or(TrackError::Empty)?;

    if let Some(bad) = sounds
        .iter()
        .find(|s| s.is_empty() || longest % s.len() != 0)
    {
        return Err(TrackError::LoopMismatch {
            len: bad.len(),
            longest,
        });
    }

    for sound in sounds.iter_mut() {
        sound.notes = sound.notes.repeat(longest / sound.len());
    }
    Ok(())
}

/// Shift every note by whole octaves, leaving rests alone.
///
/// The sound is untouched if any note would leave `0..=MAX_NOTE`.
pub fn octave_shift(sound: &mut Sound, octaves: i32) -> Result<(), TrackError> {
    let shift = 12 * octaves;
    let shifted = sound
        .notes
        .iter()
        .map(|note| match note {
            None => Ok(None),
            Some(n) => {
                let moved = *n as i32 + shift;
                if (0..=MAX_NOTE as i32).contains(&moved) {
                    Ok(Some(moved as u8))
                } else {
                    Err(TrackError::OutOfRange { note: *n, octaves })
                }
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    sound.notes = shifted;
    Ok(())
}

/// The game's sound effects and looping music
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBank {
    pub score: Sound,
    pub finish: Sound,
    pub hit: Sound,
    pub pickup: Sound,
    /// Tracks played together on a loop, all the same length
    pub music: Vec<Sound>,
}

impl SoundBank {
    pub fn standard() -> Result<Self, TrackError> {
        let speed = 30;
        let drums = convert_drums("b_s_bbs_ b_s_bbsH b_s_bbs_ b_s_bbsb", speed)?;
        let harmony = Sound::new(
            "c1 c1 e1 g1 c0 c1 e1 g1 \
             c1 c1 e1 g1 c0 c1 e1 g1 \
             a0 a0 c1 e1 r  a0 c1 e1 \
             e1 e1 g1 b1 r  e1 g1 b1",
            "t",
            "4",
            "f",
            speed,
        )?;
        let mut music = vec![drums, harmony];
        standardise_length(&mut music)?;

        Ok(Self {
            score: Sound::new("c3e3g3c4c4", "s", "4", "nnnnf", 7)?,
            finish: Sound::new("f3 b2 f2 b1 f1 f1 f1 f1", "p", "44444321", "nnnnnnnf", 9)?,
            hit: Sound::new("c3", "p", "4", "n", 7)?,
            pickup: Sound::new("a2", "s", "4", "f", 40)?,
            music,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sound(notes: &str) -> Sound {
        Sound::new(notes, "t", "4", "f", 20).expect("valid notes")
    }

    #[test]
    fn test_parse_notes() {
        let notes = parse_notes("c0 e1 r g#2 b-4").unwrap();
        assert_eq!(notes, vec![Some(0), Some(16), None, Some(32), Some(58)]);
    }

    #[test]
    fn test_parse_notes_ignores_spacing() {
        assert_eq!(parse_notes("c3e3").unwrap(), parse_notes(" c3  e3 ").unwrap());
        assert!(parse_notes("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_notes_rejects_bad_input() {
        assert_eq!(parse_notes("x3"), Err(TrackError::InvalidNote("x".into())));
        assert_eq!(parse_notes("c5"), Err(TrackError::InvalidNote("c5".into())));
        assert_eq!(parse_notes("c"), Err(TrackError::InvalidNote("c".into())));
        assert_eq!(parse_notes("c-0"), Err(TrackError::InvalidNote("c-0".into())));
        assert_eq!(parse_notes("b#4"), Err(TrackError::InvalidNote("b#4".into())));
    }

    #[test]
    fn test_convert_drums() {
        let drums = convert_drums("b_s_ bbs_", 20).unwrap();
        assert_eq!(
            drums.notes,
            vec![Some(5), None, Some(47), None, Some(5), Some(5), Some(47), None]
        );
        assert_eq!(drums.tone, "nnnnnnnn");
        assert_eq!(drums.volume, "60206620");
        assert_eq!(drums.effect, "ffffffff");
        assert_eq!(drums.speed, 20);
    }

    #[test]
    fn test_convert_drums_hats() {
        let drums = convert_drums("Hh", 10).unwrap();
        assert_eq!(drums.notes, vec![Some(MAX_NOTE), Some(MAX_NOTE)]);
        assert_eq!(drums.effect, "nf");
    }

    #[test]
    fn test_convert_drums_unknown() {
        assert_eq!(convert_drums("b_x", 20), Err(TrackError::UnknownDrum('x')));
    }

    #[test]
    fn test_standardise_length_loops_shorter_sounds() {
        let mut sounds = vec![sound("c1 d1"), sound("c2 d2 e2 f2"), sound("g3")];
        standardise_length(&mut sounds).unwrap();

        assert!(sounds.iter().all(|s| s.len() == 4));
        assert_eq!(sounds[0].notes, parse_notes("c1 d1 c1 d1").unwrap());
        assert_eq!(sounds[2].notes, parse_notes("g3 g3 g3 g3").unwrap());
    }

    #[test]
    fn test_standardise_length_mismatch_changes_nothing() {
        let mut sounds = vec![sound("c1 d1 e1"), sound("c2 d2 e2 f2")];
        let before = sounds.clone();

        assert_eq!(
            standardise_length(&mut sounds),
            Err(TrackError::LoopMismatch { len: 3, longest: 4 })
        );
        assert_eq!(sounds, before);
    }

    #[test]
    fn test_standardise_length_empty() {
        assert_eq!(standardise_length(&mut []), Err(TrackError::Empty));
    }

    #[test]
    fn test_octave_shift() {
        let mut s = sound("c1 r b2");
        octave_shift(&mut s, 1).unwrap();
        assert_eq!(s.notes, parse_notes("c2 r b3").unwrap());

        octave_shift(&mut s, -2).unwrap();
        assert_eq!(s.notes, parse_notes("c0 r b1").unwrap());
    }

    #[test]
    fn test_octave_shift_out_of_range() {
        let mut s = sound("c1 g4");
        let before = s.clone();
        assert_eq!(
            octave_shift(&mut s, 1),
            Err(TrackError::OutOfRange { note: 55, octaves: 1 })
        );
        assert_eq!(s, before);
    }

    #[test]
    fn test_standard_bank() {
        let bank = SoundBank::standard().unwrap();
        assert_eq!(bank.music.len(), 2);
        assert_eq!(bank.music[0].len(), 32);
        assert_eq!(bank.music[0].len(), bank.music[1].len());
        assert_eq!(bank.score.len(), 5);
        assert_eq!(bank.finish.len(), 8);
    }
}
