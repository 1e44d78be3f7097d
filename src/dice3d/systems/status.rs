//! Status line: usage hint, roll progress and the last result.

use bevy::prelude::*;

use crate::dice3d::context::SimulationContext;

use super::setup::{StatusText, STATUS_HINT};

pub fn update_status_text(
    ctx: Res<SimulationContext>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    let line = if ctx.tracker.is_rolling() {
        format!("Rolling {} dice...", ctx.tracker.rolling().len())
    } else if let Some(outcome) = &ctx.tracker.last_outcome {
        format!("{}  |  {}", outcome.describe(), STATUS_HINT)
    } else if !ctx.selection.is_empty() {
        format!("{} selected  |  {}", ctx.selection.len(), STATUS_HINT)
    } else {
        STATUS_HINT.to_string()
    };

    for mut text in text_query.iter_mut() {
        if text.0 != line {
            text.0 = line.clone();
        }
    }
}
