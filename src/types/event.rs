/// A named calendar entry. The date is already in long display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub date: String,
}

impl Event {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
        }
    }
}

/// One line of a rendered event list, tagged with its zero-based display index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub index: usize,
    pub name: String,
    pub date: String,
}

impl EventRow {
    pub fn render(&self) -> String {
        format!("`{}`: {} - {}", self.index, self.name, self.date)
    }
}

/// Result of listing the store. `Empty` is kept distinct from an empty row set so
/// callers can render the "no events" notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventListing {
    Empty,
    Rows(Vec<EventRow>),
}

pub const NO_EVENTS_MESSAGE: &str = "`No events found.`";

impl EventListing {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Rows(rows) => rows.len(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> String {
        match self {
            Self::Empty => NO_EVENTS_MESSAGE.to_string(),
            Self::Rows(rows) => rows
                .iter()
                .map(EventRow::render)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, name: &str, date: &str) -> EventRow {
        EventRow {
            index,
            name: name.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_row_render() {
        assert_eq!(
            row(0, "Gala", "January 5, 2025").render(),
            "`0`: Gala - January 5, 2025"
        );
    }

    #[test]
    fn test_empty_listing_render() {
        assert_eq!(EventListing::Empty.render(), "`No events found.`");
        assert!(EventListing::Empty.is_empty());
    }

    #[test]
    fn test_rows_render_one_per_line() {
        let listing = EventListing::Rows(vec![
            row(0, "Gala", "January 5, 2025"),
            row(1, "Picnic", "June 19, 2025"),
        ]);

        assert_eq!(listing.len(), 2);
        assert_eq!(
            listing.render(),
            "`0`: Gala - January 5, 2025\n`1`: Picnic - June 19, 2025"
        );
    }
}
