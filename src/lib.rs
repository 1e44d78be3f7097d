//! Tabletop dice: a table, a pair of six-sided dice, pointer selection and
//! physics rolls. The simulation core lives in [`dice3d`] and is driven by a
//! Bevy app in `main.rs`.

pub mod dice3d;
