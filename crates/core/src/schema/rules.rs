use std::fmt;

use scraper::Selector;

use crate::parse::{Element, compile_selector};
use crate::record::TrainRecord;
use crate::{KeretaError, Result};

/// Selector for the node that wraps one train offering.
pub const DEFAULT_CONTAINER: &str = "div.data-wrapper";

/// A field of [`TrainRecord`] that a rule can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TrainName,
    TrainClass,
    DepartureStation,
    DepartureDate,
    DepartureTime,
    ArrivalStation,
    ArrivalDate,
    ArrivalTime,
    TravelTime,
    TicketPrice,
    SeatAvailability,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::TrainName,
        Field::TrainClass,
        Field::DepartureStation,
        Field::DepartureDate,
        Field::DepartureTime,
        Field::ArrivalStation,
        Field::ArrivalDate,
        Field::ArrivalTime,
        Field::TravelTime,
        Field::TicketPrice,
        Field::SeatAvailability,
    ];

    /// The key used for this field in schema files.
    pub fn name(self) -> &'static str {
        match self {
            Field::TrainName => "train_name",
            Field::TrainClass => "train_class",
            Field::DepartureStation => "departure_station",
            Field::DepartureDate => "departure_date",
            Field::DepartureTime => "departure_time",
            Field::ArrivalStation => "arrival_station",
            Field::ArrivalDate => "arrival_date",
            Field::ArrivalTime => "arrival_time",
            Field::TravelTime => "travel_time",
            Field::TicketPrice => "ticket_price",
            Field::SeatAvailability => "seat_availability",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    /// The slot in `record` this field writes to.
    pub fn slot(self, record: &mut TrainRecord) -> &mut String {
        match self {
            Field::TrainName => &mut record.train_name,
            Field::TrainClass => &mut record.train_class,
            Field::DepartureStation => &mut record.train_origin.departure_station,
            Field::DepartureDate => &mut record.train_origin.departure_date,
            Field::DepartureTime => &mut record.train_origin.departure_time,
            Field::ArrivalStation => &mut record.train_destination.arrival_station,
            Field::ArrivalDate => &mut record.train_destination.arrival_date,
            Field::ArrivalTime => &mut record.train_destination.arrival_time,
            Field::TravelTime => &mut record.travel_time,
            Field::TicketPrice => &mut record.ticket_price,
            Field::SeatAvailability => &mut record.seat_availability,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a field's text is located inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Text of every descendant matching the selector.
    Text(String),
    /// Text of the first element child across all matching descendants.
    ///
    /// Trimmed like [`Rule::Text`], so indentation inside the child's markup
    /// never reaches the record.
    FirstChild(String),
    /// Text of the last element child across all matching descendants.
    ///
    /// Trimmed the same way as [`Rule::FirstChild`].
    LastChild(String),
}

impl Rule {
    pub fn selector(&self) -> &str {
        match self {
            Rule::Text(s) | Rule::FirstChild(s) | Rule::LastChild(s) => s,
        }
    }

    pub fn compile(&self) -> Result<CompiledRule> {
        Ok(CompiledRule { rule: self.clone(), selector: compile_selector(self.selector())? })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Text(s) => write!(f, "text {}", s),
            Rule::FirstChild(s) => write!(f, "first-child {}", s),
            Rule::LastChild(s) => write!(f, "last-child {}", s),
        }
    }
}

/// A [`Rule`] with its selector compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Rule,
    selector: Selector,
}

impl CompiledRule {
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Reads this rule's text from `container`, trimmed.
    ///
    /// Returns an empty string when nothing matches.
    pub fn apply(&self, container: &Element<'_>) -> String {
        let matches = container.select_compiled(&self.selector);

        let text = match self.rule {
            Rule::Text(_) => matches.iter().map(Element::text).collect::<String>(),
            Rule::FirstChild(_) => matches
                .iter()
                .flat_map(Element::children)
                .next()
                .map(|el| el.text())
                .unwrap_or_default(),
            Rule::LastChild(_) => matches
                .iter()
                .flat_map(Element::children)
                .last()
                .map(|el| el.text())
                .unwrap_or_default(),
        };

        text.trim().to_string()
    }
}

/// The table mapping each record field to the rule that reads it.
///
/// The default schema matches the booking site's current result layout.
///
/// # Example
///
/// ```rust
/// use kereta_core::schema::{ExtractionSchema, Field, Rule};
///
/// let mut schema = ExtractionSchema::default();
/// schema.set(Field::TicketPrice, Rule::Text("span.harga".to_string()));
/// assert_eq!(schema.rule(Field::TicketPrice), Some(&Rule::Text("span.harga".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSchema {
    container: String,
    rules: Vec<(Field, Rule)>,
}

impl Default for ExtractionSchema {
    fn default() -> Self {
        let text = |s: &str| Rule::Text(s.to_string());

        Self {
            container: DEFAULT_CONTAINER.to_string(),
            rules: vec![
                (Field::TrainName, text("div.name")),
                (Field::TrainClass, Rule::LastChild("div.col-one".to_string())),
                (Field::DepartureStation, text("div.station-start")),
                (Field::DepartureDate, text("div.date-start")),
                (Field::DepartureTime, text("div.time-start")),
                (Field::ArrivalStation, Rule::FirstChild("div.card-arrival".to_string())),
                (Field::ArrivalDate, Rule::LastChild("div.card-arrival".to_string())),
                (Field::ArrivalTime, text("div.time-end")),
                (Field::TravelTime, text("div.long-time")),
                (Field::TicketPrice, text("div.price")),
                (Field::SeatAvailability, text("small.sisa-kursi")),
            ],
        }
    }
}

impl ExtractionSchema {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn set_container(&mut self, selector: impl Into<String>) {
        self.container = selector.into();
    }

    pub fn rules(&self) -> &[(Field, Rule)] {
        &self.rules
    }

    pub fn rule(&self, field: Field) -> Option<&Rule> {
        self.rules.iter().find(|(f, _)| *f == field).map(|(_, r)| r)
    }

    /// Replaces the rule for `field`, or adds one if the field had none.
    pub fn set(&mut self, field: Field, rule: Rule) {
        match self.rules.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = rule,
            None => self.rules.push((field, rule)),
        }
    }

    /// Compiles every selector in the schema.
    ///
    /// # Errors
    ///
    /// Returns [`KeretaError::HtmlParseError`] naming the first invalid selector.
    pub fn compile(&self) -> Result<CompiledSchema> {
        let container = compile_selector(&self.container)?;
        let rules = self
            .rules
            .iter()
            .map(|(field, rule)| {
                rule.compile()
                    .map(|compiled| (*field, compiled))
                    .map_err(|e| KeretaError::HtmlParseError(format!("{}: {}", field, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledSchema { container, rules })
    }
}

/// An [`ExtractionSchema`] ready to run against documents.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    container: Selector,
    rules: Vec<(Field, CompiledRule)>,
}

impl CompiledSchema {
    pub fn container(&self) -> &Selector {
        &self.container
    }

    /// Builds one record from a container; fields without a rule stay empty.
    pub fn record(&self, container: &Element<'_>) -> TrainRecord {
        let mut record = TrainRecord::default();
        for (field, rule) in &self.rules {
            *field.slot(&mut record) = rule.apply(container);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;

    const CONTAINER: &str = r#"
        <div class="data-wrapper">
            <div class="col-one">
                <div class="name">ARGO LAWU</div>
                <div class="class">Eksekutif (A)</div>
            </div>
            <div class="card-arrival">
                <div class="station-end">YOGYAKARTA</div>
                <div class="time-end">04:28</div>
                <div class="date-end">21 Sep 2022</div>
            </div>
            <div class="price">  Rp 350.000,-  </div>
        </div>
    "#;

    fn apply(rule: Rule) -> String {
        let doc = Document::parse(CONTAINER).unwrap();
        let container = &doc.select(DEFAULT_CONTAINER).unwrap()[0];
        rule.compile().unwrap().apply(container)
    }

    #[test]
    fn test_text_rule_trims() {
        assert_eq!(apply(Rule::Text("div.price".to_string())), "Rp 350.000,-");
    }

    #[test]
    fn test_first_child_rule() {
        assert_eq!(apply(Rule::FirstChild("div.card-arrival".to_string())), "YOGYAKARTA");
    }

    #[test]
    fn test_last_child_rule() {
        assert_eq!(apply(Rule::LastChild("div.card-arrival".to_string())), "21 Sep 2022");
        assert_eq!(apply(Rule::LastChild("div.col-one".to_string())), "Eksekutif (A)");
    }

    #[test]
    fn test_child_rules_trim_indented_text() {
        let html = r#"
            <div class="data-wrapper">
                <div class="col-one">
                    <div class="name">ARGO LAWU</div>
                    <div class="class">
                        Eksekutif
                    </div>
                </div>
            </div>
        "#;
        let doc = Document::parse(html).unwrap();
        let container = &doc.select(DEFAULT_CONTAINER).unwrap()[0];

        let last = Rule::LastChild("div.col-one".to_string()).compile().unwrap();
        let first = Rule::FirstChild("div.col-one".to_string()).compile().unwrap();
        assert_eq!(last.apply(container), "Eksekutif");
        assert_eq!(first.apply(container), "ARGO LAWU");
    }

    #[test]
    fn test_missing_selector_is_empty() {
        assert_eq!(apply(Rule::Text("small.sisa-kursi".to_string())), "");
        assert_eq!(apply(Rule::FirstChild("div.nothing".to_string())), "");
        assert_eq!(apply(Rule::LastChild("div.price".to_string())), "");
    }

    #[test]
    fn test_field_names_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("price"), None);
    }

    #[test]
    fn test_default_schema_covers_every_field() {
        let schema = ExtractionSchema::default();
        assert_eq!(schema.container(), "div.data-wrapper");
        for field in Field::ALL {
            assert!(schema.rule(field).is_some(), "no rule for {}", field);
        }
        assert!(schema.compile().is_ok());
    }

    #[test]
    fn test_set_replaces_rule() {
        let mut schema = ExtractionSchema::default();
        schema.set(Field::TicketPrice, Rule::Text("span.harga".to_string()));

        assert_eq!(schema.rules().len(), Field::ALL.len());
        assert_eq!(schema.rule(Field::TicketPrice).map(Rule::selector), Some("span.harga"));
    }

    #[test]
    fn test_compile_reports_field() {
        let mut schema = ExtractionSchema::default();
        schema.set(Field::TravelTime, Rule::Text("[[bad".to_string()));

        match schema.compile() {
            Err(KeretaError::HtmlParseError(msg)) => assert!(msg.contains("travel_time")),
            other => panic!("expected HtmlParseError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::LastChild("div.col-one".to_string()).to_string(), "last-child div.col-one");
    }
}
