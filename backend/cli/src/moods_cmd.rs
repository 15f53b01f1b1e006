//! `harimu moods`: lists the moods, their relief routing and intro lines.

use anyhow::Result;
use harimu_core::{script_for, FlowSettings, MOODS};

use crate::terminal_output::{render_table, Column};

pub async fn run() -> Result<()> {
    let prepared = crate::startup::prepare(true).await?;
    print!("{}", mood_table(&prepared.runtime.flow));
    Ok(())
}

fn mood_table(flow: &FlowSettings) -> String {
    let columns = [
        Column::left("Id"),
        Column::left("Mood"),
        Column::left("Relief"),
        Column::left("Intro").max_width(72),
    ];
    let rows: Vec<Vec<String>> = MOODS
        .iter()
        .map(|mood| {
            vec![
                mood.id.to_string(),
                format!("{} {}", mood.emoji, mood.label),
                relief_routing(flow, mood.id),
                script_for(mood.id).initial_bot_message.to_string(),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

fn relief_routing(flow: &FlowSettings, mood: harimu_core::MoodId) -> String {
    if flow.heavy_moods.contains(&mood) {
        format!("balloon {:.0}% / treat", flow.balloon_probability * 100.0)
    } else {
        "treat".to_string()
    }
}
