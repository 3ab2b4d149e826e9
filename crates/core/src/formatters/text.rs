use crate::query::{DESTINATION, ORIGINATION, SearchQuery, TANGGAL};
use crate::record::{ResultSet, TrainRecord};

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Start with a line describing the search
    pub include_header: bool,

    /// Number each train
    pub numbered: bool,
}

/// Plain text formatter for console listings
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, trains: &ResultSet, query: Option<&SearchQuery>) -> String {
        convert_to_text(trains, query, &self.config)
    }
}

/// Render trains as a readable listing, one block per train.
pub fn convert_to_text(trains: &ResultSet, query: Option<&SearchQuery>, config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header
        && let Some(query) = query
    {
        output.push_str(&generate_header(query, trains.len()));
        output.push_str("\n\n");
    }

    let blocks: Vec<String> = trains
        .iter()
        .enumerate()
        .map(|(i, train)| {
            let number = if config.numbered { format!("{}. ", i + 1) } else { String::new() };
            format!("{}{}", number, format_train(train))
        })
        .collect();

    output.push_str(&blocks.join("\n\n"));
    output.trim_end().to_string()
}

/// Generate a header from the search query
fn generate_header(query: &SearchQuery, count: usize) -> String {
    let title = format!(
        "{} -> {} on {}",
        query.get(ORIGINATION).unwrap_or_default(),
        query.get(DESTINATION).unwrap_or_default(),
        query.get(TANGGAL).unwrap_or_default(),
    );

    format!("{}\n{}\n{} train(s)", title, "=".repeat(title.chars().count()), count)
}

fn format_train(train: &TrainRecord) -> String {
    let origin = &train.train_origin;
    let destination = &train.train_destination;

    let mut lines = vec![join_non_empty(&[&train.train_name, &bracketed(&train.train_class)])];
    lines.push(format!(
        "  {} -> {}",
        join_non_empty(&[&origin.departure_station, &origin.departure_date, &origin.departure_time]),
        join_non_empty(&[&destination.arrival_station, &destination.arrival_date, &destination.arrival_time]),
    ));

    let details = join_non_empty(&[&train.travel_time, &train.ticket_price, &train.seat_availability]);
    if !details.is_empty() {
        lines.push(format!("  {}", details));
    }

    lines.join("\n")
}

fn bracketed(s: &str) -> String {
    if s.is_empty() { String::new() } else { format!("[{}]", s) }
}

fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{TrainDestination, TrainOrigin};

    fn train() -> TrainRecord {
        TrainRecord {
            train_name: "ARGO LAWU".to_string(),
            train_class: "Eksekutif (A)".to_string(),
            train_origin: TrainOrigin {
                departure_station: "PASARSENEN".to_string(),
                departure_date: "20 Sep 2022".to_string(),
                departure_time: "20:45".to_string(),
            },
            train_destination: TrainDestination {
                arrival_station: "YOGYAKARTA".to_string(),
                arrival_date: "21 Sep 2022".to_string(),
                arrival_time: "04:28".to_string(),
            },
            travel_time: "7j 43m".to_string(),
            ticket_price: "Rp 350.000,-".to_string(),
            seat_availability: "Tersedia".to_string(),
        }
    }

    #[test]
    fn test_format_train() {
        let text = format_train(&train());
        assert_eq!(
            text,
            "ARGO LAWU [Eksekutif (A)]\n  PASARSENEN 20 Sep 2022 20:45 -> YOGYAKARTA 21 Sep 2022 04:28\n  7j 43m Rp 350.000,- Tersedia"
        );
    }

    #[test]
    fn test_format_train_with_gaps() {
        let sparse = TrainRecord { train_name: "TAKSAKA".to_string(), ..Default::default() };
        assert_eq!(format_train(&sparse), "TAKSAKA\n   -> ");
    }

    #[test]
    fn test_convert_numbered() {
        let trains = ResultSet::new(vec![train(), train()]);
        let config = TextConfig { numbered: true, ..Default::default() };
        let text = convert_to_text(&trains, None, &config);

        assert!(text.starts_with("1. ARGO LAWU"));
        assert!(text.contains("\n\n2. ARGO LAWU"));
    }

    #[test]
    fn test_convert_header_needs_query() {
        let trains = ResultSet::new(vec![train()]);
        let config = TextConfig { include_header: true, ..Default::default() };
        let text = convert_to_text(&trains, None, &config);
        assert!(text.starts_with("ARGO LAWU"));
    }

    #[test]
    fn test_convert_empty() {
        let text = TextFormatter::new(TextConfig::default()).convert(&ResultSet::default(), None);
        assert!(text.is_empty());
    }
}
