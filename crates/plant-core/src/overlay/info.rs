//! Info Window Content
//!
//! What a click on an overlay shows: the record merged over its species
//! defaults, with the seasonal month bar.

use crate::domain::{PlantId, PlantKind, PlantRecord, SeasonDates, SpeciesDefault};
use crate::season::SeasonCalendar;

#[derive(Debug, Clone, PartialEq)]
pub struct InfoContent {
    pub record_id: PlantId,
    pub kind: PlantKind,
    pub name: String,
    pub description: Option<String>,
    pub season: SeasonDates,
    pub calendar: SeasonCalendar,
}

impl InfoContent {
    /// Record fields win; gaps are filled from the species defaults
    pub fn for_record(record: &PlantRecord, species: Option<&SpeciesDefault>) -> Self {
        let season = match species {
            Some(s) => record.season.or(&s.season),
            None => record.season.or(&SeasonDates::default()),
        };
        let description = record
            .description()
            .or_else(|| species.and_then(|s| s.description()))
            .map(str::to_string);
        let calendar = SeasonCalendar::classify(season.bloom(), season.leaf());
        Self {
            record_id: record.id.clone(),
            kind: record.kind(),
            name: record.name.clone(),
            description,
            season,
            calendar,
        }
    }

    /// "Bloom: a - b" / "Leaf change: a - b" lines for phases that are set
    pub fn season_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let bloom = self.season.bloom();
        if !bloom.is_empty() {
            lines.push(format!("Bloom: {}", bloom.describe()));
        }
        let leaf = self.season.leaf();
        if !leaf.is_empty() {
            lines.push(format!("Leaf change: {}", leaf.describe()));
        }
        lines
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div class="plant-info-window"><div class="plant-name">{}</div><div class="plant-desc">{}"#,
            escape_html(&self.name),
            escape_html(self.description.as_deref().unwrap_or("No description yet")),
        );
        let lines = self.season_lines();
        if !lines.is_empty() {
            let escaped: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
            html.push_str(&format!("<br><small>{}</small>", escaped.join("<br>")));
        }
        html.push_str("</div>");
        html.push_str(&self.calendar.to_html());
        html.push_str("</div>");
        html
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LngLat;
    use crate::season::MonthClass;

    #[test]
    fn test_species_fills_gaps() {
        let mut record = PlantRecord::point(PlantId::from("1"), "Cherry", LngLat::new(0.0, 0.0));
        record.season.bloom_start = Some("04".to_string());
        let species = SpeciesDefault {
            name: "Cherry".to_string(),
            description: Some("Pink <b>blossoms</b>".to_string()),
            season: SeasonDates {
                bloom_start: Some("03".to_string()),
                bloom_end: Some("05".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        let info = InfoContent::for_record(&record, Some(&species));
        assert_eq!(info.description.as_deref(), Some("Pink <b>blossoms</b>"));
        assert_eq!(info.calendar.month(3), Some(MonthClass::Neither));
        assert_eq!(info.calendar.month(4), Some(MonthClass::BloomOnly));
        assert_eq!(info.season_lines(), vec!["Bloom: 04 - 05"]);

        let html = info.to_html();
        assert!(html.contains("Pink &lt;b&gt;blossoms&lt;/b&gt;"));
        assert!(html.contains("month-bar"));
    }

    #[test]
    fn test_without_species() {
        let record = PlantRecord::area(PlantId::from("2"), "Lawn", vec![]);
        let info = InfoContent::for_record(&record, None);
        assert_eq!(info.kind, PlantKind::Area);
        assert!(info.season_lines().is_empty());
        assert!(info.calendar.is_blank());
        assert!(info.to_html().contains("No description yet"));
    }
}
