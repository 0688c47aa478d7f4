use rover_assets::{AssetHandle, AssetIndex, Spoken};
use rover_core::{EngineState, EventKind, SelectedLine, Tier, TierPools};

use super::OutputFormat;

pub fn format_spoken(line: &SelectedLine, spoken: &Spoken, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::json!({
            "event": line.event,
            "tier": line.tier,
            "text": line.text,
            "spoken": spoken,
        })
        .to_string(),
        OutputFormat::Text => {
            let via = match spoken {
                Spoken::Clip(clip) => format!("  <{}>", clip.clip_id),
                Spoken::Speech => String::new(),
                Spoken::Silent => "  (no audio)".to_string(),
            };
            format!("[{}/{}] {}{via}", line.event, line.tier.name(), line.text)
        }
    }
}

pub fn format_state(state: &EngineState, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string(state).unwrap_or_default(),
        OutputFormat::Text => format!(
            "intensity={} irritation={} next tier={}",
            state.intensity.name(),
            state.irritation,
            state.tier().name()
        ),
    }
}

pub fn format_lines<'a, I>(events: I, fmt: OutputFormat) -> String
where
    I: IntoIterator<Item = (&'a EventKind, &'a TierPools)>,
{
    match fmt {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = events
                .into_iter()
                .map(|(event, pools)| {
                    (
                        event.to_string(),
                        serde_json::to_value(pools).unwrap_or_default(),
                    )
                })
                .collect();
            serde_json::to_string_pretty(&map).unwrap_or_default()
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for (event, pools) in events {
                out.push_str(&format!("{event}\n"));
                for (tier, lines) in pools {
                    for line in lines {
                        out.push_str(&format!("  {} {line}\n", tier.name()));
                    }
                }
            }
            if out.is_empty() {
                out.push_str("No lines found.\n");
            }
            out
        }
    }
}

pub fn format_clips(index: &AssetIndex, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => {
            let clips: Vec<_> = index
                .iter()
                .map(|(id, path)| serde_json::json!({ "clip_id": id, "path": path }))
                .collect();
            serde_json::to_string_pretty(&serde_json::json!({
                "clips": clips,
                "fallback_tts": index.fallback_tts(),
            }))
            .unwrap_or_default()
        }
        OutputFormat::Text => {
            if index.is_empty() {
                return "No clips found.\n".to_string();
            }
            let mut out = String::new();
            for (id, path) in index.iter() {
                out.push_str(&format!("{id:<24} {}\n", path.display()));
            }
            out.push_str(&format!(
                "{} clips, speech fallback {}\n",
                index.len(),
                if index.fallback_tts() { "on" } else { "off" }
            ));
            out
        }
    }
}

pub fn format_resolved(
    event: &EventKind,
    tier: Tier,
    clip: Option<&AssetHandle>,
    fmt: OutputFormat,
) -> String {
    match fmt {
        OutputFormat::Json => serde_json::json!({
            "event": event,
            "tier": tier,
            "clip": clip,
        })
        .to_string(),
        OutputFormat::Text => match clip {
            Some(clip) => format!("{} {}", clip.clip_id, clip.path.display()),
            None => format!("No clip for {event} at tier {}", tier.name()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn line() -> SelectedLine {
        SelectedLine {
            text: "Bazinga.".into(),
            event: EventKind::COLLISION,
            tier: Tier::MID,
        }
    }

    #[test]
    fn test_format_spoken_text() {
        let clip = AssetHandle {
            clip_id: "COLLISION_1_0".into(),
            path: PathBuf::from("collision_1_0.mp3"),
        };
        assert_eq!(
            format_spoken(&line(), &Spoken::Clip(clip), OutputFormat::Text),
            "[COLLISION/MID] Bazinga.  <COLLISION_1_0>"
        );
        assert_eq!(
            format_spoken(&line(), &Spoken::Speech, OutputFormat::Text),
            "[COLLISION/MID] Bazinga."
        );
    }

    #[test]
    fn test_format_spoken_json() {
        let out = format_spoken(&line(), &Spoken::Silent, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["event"], "COLLISION");
        assert_eq!(value["tier"], 1);
        assert_eq!(value["spoken"]["kind"], "silent");
    }

    #[test]
    fn test_format_resolved_miss() {
        let out = format_resolved(&EventKind::STUCK, Tier::HIGH, None, OutputFormat::Text);
        assert_eq!(out, "No clip for STUCK at tier HIGH");
    }

    #[test]
    fn test_format_clips_empty() {
        let index = AssetIndex::default();
        assert_eq!(format_clips(&index, OutputFormat::Text), "No clips found.\n");
    }
}
