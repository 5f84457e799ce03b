//! Seasonal Month Ranges
//!
//! Turns a bloom range and a leaf-change range, each possibly wrapping
//! across year-end, into a 12-slot calendar. Pure; never fails.

/// A pair of date-like strings (`YYYY-MM-DD`, `MM-DD` or a bare month)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
}

impl<'a> DateRange<'a> {
    pub fn new(start: Option<&'a str>, end: Option<&'a str>) -> Self {
        Self { start, end }
    }

    /// True when neither bound is given
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn months(&self) -> [bool; 12] {
        months_in_range(
            self.start.and_then(parse_month),
            self.end.and_then(parse_month),
        )
    }

    /// Human-readable `start - end`, either side may be missing
    pub fn describe(&self) -> String {
        match (self.start, self.end) {
            (Some(s), Some(e)) => format!("{} - {}", s, e),
            (Some(s), None) => s.to_string(),
            (None, Some(e)) => format!("- {}", e),
            (None, None) => String::new(),
        }
    }
}

/// Month number 1..=12 from a date-like string, `None` when unusable.
///
/// `YYYY-MM-DD` reads the middle field, `MM-DD` and bare values the first.
/// Fields are read leniently: leading whitespace and trailing junk after the
/// digits are ignored.
pub fn parse_month(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parts: Vec<&str> = raw.split('-').collect();
    let field = match parts.len() {
        3 => parts[1],
        1 | 2 => parts[0],
        _ => {
            log::debug!("unrecognized date shape: {:?}", raw);
            return None;
        }
    };
    let digits: String = field
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u8>() {
        Ok(month @ 1..=12) => Some(month),
        _ => {
            log::debug!("no month in {:?}", raw);
            None
        }
    }
}

/// Months covered by `start..=end` (1-based), wrapping past December.
///
/// Either bound missing or out of range yields an empty calendar.
pub fn months_in_range(start: Option<u8>, end: Option<u8>) -> [bool; 12] {
    let mut marked = [false; 12];
    let (Some(start), Some(end)) = (start, end) else {
        return marked;
    };
    if !(1..=12).contains(&start) || !(1..=12).contains(&end) {
        return marked;
    }
    let (s, e) = (usize::from(start - 1), usize::from(end - 1));
    if s <= e {
        marked[s..=e].iter_mut().for_each(|m| *m = true);
    } else {
        marked[s..].iter_mut().for_each(|m| *m = true);
        marked[..=e].iter_mut().for_each(|m| *m = true);
    }
    marked
}

/// Per-month classification; the swatch of each class carries the meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthClass {
    Both,
    BloomOnly,
    LeafOnly,
    Neither,
}

pub const BLOOM_COLOR: &str = "#ff8da1";
pub const LEAF_COLOR: &str = "#ffb74d";

impl MonthClass {
    pub fn from_flags(bloom: bool, leaf: bool) -> Self {
        match (bloom, leaf) {
            (true, true) => MonthClass::Both,
            (true, false) => MonthClass::BloomOnly,
            (false, true) => MonthClass::LeafOnly,
            (false, false) => MonthClass::Neither,
        }
    }

    /// CSS background for the month segment
    pub fn swatch(&self) -> &'static str {
        match self {
            MonthClass::Both => "linear-gradient(90deg, #ff8da1 50%, #ffb74d 50%)",
            MonthClass::BloomOnly => BLOOM_COLOR,
            MonthClass::LeafOnly => LEAF_COLOR,
            MonthClass::Neither => "#eee",
        }
    }

    pub fn is_bloom(&self) -> bool {
        matches!(self, MonthClass::Both | MonthClass::BloomOnly)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MonthClass::Both | MonthClass::LeafOnly)
    }
}

/// Twelve classified months, January first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonCalendar {
    months: [MonthClass; 12],
}

impl SeasonCalendar {
    pub fn classify(bloom: DateRange<'_>, leaf: DateRange<'_>) -> Self {
        let bloom = bloom.months();
        let leaf = leaf.months();
        let mut months = [MonthClass::Neither; 12];
        for (i, class) in months.iter_mut().enumerate() {
            *class = MonthClass::from_flags(bloom[i], leaf[i]);
        }
        Self { months }
    }

    /// Class of a 1-based month; `None` outside 1..=12
    pub fn month(&self, month: u8) -> Option<MonthClass> {
        self.months.get(usize::from(month).checked_sub(1)?).copied()
    }

    pub fn months(&self) -> &[MonthClass; 12] {
        &self.months
    }

    pub fn is_blank(&self) -> bool {
        self.months.iter().all(|m| *m == MonthClass::Neither)
    }

    /// Month bar markup for map info windows
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="month-bar">"#);
        for class in &self.months {
            html.push_str(&format!(
                r#"<div class="month-seg" style="background: {};"></div>"#,
                class.swatch()
            ));
        }
        html.push_str("</div>");
        html.push_str(&format!(
            r#"<div class="month-legend"><span style="color:{}">▇</span> Bloom <span style="color:{};margin-left:8px">▇</span> Leaf change</div>"#,
            BLOOM_COLOR, LEAF_COLOR
        ));
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(mask: &[bool; 12]) -> Vec<u8> {
        (1..=12u8).filter(|m| mask[usize::from(m - 1)]).collect()
    }

    #[test]
    fn test_parse_month_shapes() {
        assert_eq!(parse_month("2024-03-01"), Some(3));
        assert_eq!(parse_month("11-01"), Some(11));
        assert_eq!(parse_month("7"), Some(7));
        assert_eq!(parse_month(" 05"), Some(5));
        assert_eq!(parse_month("2024-12"), None);
        assert_eq!(parse_month(""), None);
        assert_eq!(parse_month("spring"), None);
        assert_eq!(parse_month("13-01"), None);
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("1-2-3-4"), None);
    }

    #[test]
    fn test_contiguous_ranges_mark_exact_span() {
        for start in 1..=12u8 {
            for end in start..=12u8 {
                let mask = months_in_range(Some(start), Some(end));
                let expected: Vec<u8> = (start..=end).collect();
                assert_eq!(marked(&mask), expected, "range {}..={}", start, end);
                assert_eq!(mask.iter().filter(|m| **m).count(), usize::from(end - start + 1));
            }
        }
    }

    #[test]
    fn test_wrapping_ranges_mark_across_year_end() {
        for start in 2..=12u8 {
            for end in 1..start {
                let mask = months_in_range(Some(start), Some(end));
                let count = mask.iter().filter(|m| **m).count();
                assert_eq!(count, usize::from((12 - start) + end + 1), "range {}..={}", start, end);
                assert!(mask[usize::from(start - 1)]);
                assert!(mask[usize::from(end - 1)]);
                assert!(mask[11] && mask[0]);
            }
        }
    }

    #[test]
    fn test_missing_bound_is_empty() {
        for m in 1..=12u8 {
            assert_eq!(months_in_range(None, Some(m)), [false; 12]);
            assert_eq!(months_in_range(Some(m), None), [false; 12]);
        }
        assert_eq!(months_in_range(None, None), [false; 12]);
    }

    #[test]
    fn test_single_month_range() {
        assert_eq!(marked(&months_in_range(Some(6), Some(6))), vec![6]);
    }

    #[test]
    fn test_bloom_scenario() {
        let bloom = DateRange::new(Some("2024-03-01"), Some("2024-05-15"));
        assert_eq!(marked(&bloom.months()), vec![3, 4, 5]);
        let calendar = SeasonCalendar::classify(bloom, DateRange::default());
        assert_eq!(calendar.month(5), Some(MonthClass::BloomOnly));
        assert_eq!(calendar.month(6), Some(MonthClass::Neither));
    }

    #[test]
    fn test_leaf_wrap_scenario() {
        let leaf = DateRange::new(Some("11-01"), Some("02-28"));
        assert_eq!(marked(&leaf.months()), vec![1, 2, 11, 12]);
    }

    #[test]
    fn test_overlap_is_both() {
        let bloom = DateRange::new(Some("10"), Some("12"));
        let leaf = DateRange::new(Some("11-01"), Some("02-28"));
        let calendar = SeasonCalendar::classify(bloom, leaf);
        assert_eq!(calendar.month(10), Some(MonthClass::BloomOnly));
        assert_eq!(calendar.month(11), Some(MonthClass::Both));
        assert_eq!(calendar.month(12), Some(MonthClass::Both));
        assert_eq!(calendar.month(1), Some(MonthClass::LeafOnly));
        assert_eq!(calendar.month(3), Some(MonthClass::Neither));
        assert_eq!(calendar.month(0), None);
        assert_eq!(calendar.month(13), None);
        assert!(calendar.months().iter().filter(|c| c.is_bloom() && c.is_leaf()).count() == 2);
    }

    #[test]
    fn test_unparseable_degrades_to_empty() {
        let calendar = SeasonCalendar::classify(
            DateRange::new(Some("soon"), Some("05")),
            DateRange::new(None, Some("02")),
        );
        assert!(calendar.is_blank());
    }

    #[test]
    fn test_swatches_are_fixed() {
        assert_eq!(MonthClass::BloomOnly.swatch(), "#ff8da1");
        assert_eq!(MonthClass::LeafOnly.swatch(), "#ffb74d");
        assert_eq!(MonthClass::Neither.swatch(), "#eee");
        assert!(MonthClass::Both.swatch().contains("#ff8da1 50%, #ffb74d 50%"));
    }

    #[test]
    fn test_month_bar_html_has_twelve_segments() {
        let calendar = SeasonCalendar::classify(DateRange::new(Some("3"), Some("4")), DateRange::default());
        let html = calendar.to_html();
        assert_eq!(html.matches("month-seg").count(), 12);
        assert_eq!(html.matches("background: #ff8da1;").count(), 2);
    }

    #[test]
    fn test_describe() {
        assert_eq!(DateRange::new(Some("03-01"), Some("05-15")).describe(), "03-01 - 05-15");
        assert_eq!(DateRange::new(None, Some("05-15")).describe(), "- 05-15");
        assert_eq!(DateRange::default().describe(), "");
    }
}
