//! Fixed output schema for precinct result records
//!
//! The upstream results table always has 27 rows: a header row of precinct
//! labels, 25 metric rows, and one blank subtotal divider before the party
//! totals. The column names below are domain constants from the source site,
//! not structural requirements.

/// Total rows in a well-formed results table, including the two separator rows.
pub const TABLE_ROWS: usize = 27;

/// Pre-deletion indices of the rows that must contain no numeric cells.
///
/// Row 0 carries the precinct labels (plain text, no bolded values) and row
/// 19 is the divider between the ballot counters and the party totals.
pub const SEPARATOR_ROWS: [usize; 2] = [0, 19];

/// Number of metric values per precinct record after the separators are dropped.
pub const METRIC_COUNT: usize = TABLE_ROWS - SEPARATOR_ROWS.len();

/// Field separator in the output stream. Never escaped; the source data is
/// assumed not to contain it.
pub const FIELD_SEPARATOR: char = ';';

/// The 27 output column names: region path, precinct label, 18 ballot and
/// absentee-certificate counters, then 7 party vote totals.
pub const COLUMNS: [&str; METRIC_COUNT + 2] = [
    "Регион",
    "УИК",
    "Число избирателей, внесенных в список избирателей",
    "Число избирательных бюллетеней, полученных участковой избирательной комиссией",
    "Число избирательных бюллетеней, выданных избирателям, проголосовавшим досрочно",
    "Число избирательных бюллетеней, выданных избирателям в помещении для голосования",
    "Число избирательных бюллетеней, выданных избирателям вне помещения для голосования ",
    "Число погашенных избирательных бюллетеней",
    "Число избирательных бюллетеней в переносных ящиках для голосования",
    "Число избирательных бюллетеней в стационарных ящиках для голосования",
    "Число недействительных избирательных бюллетеней",
    "Число действительных избирательных бюллетеней",
    "Число открепительных удостоверений, полученных участковой избирательной комиссией",
    "Число открепительных удостоверений, выданных избирателям на избирательном участке",
    "Число избирателей, проголосовавших по открепительным удостоверениям на избирательном участке",
    "Число погашенных неиспользованных открепительных удостоверений",
    "Число открепительных удостоверений, выданных избирателям территориальной избирательной комиссией",
    "Число утраченных открепительных удостоверений",
    "Число утраченных избирательных бюллетеней",
    "Число избирательных бюллетеней, не учтенных при получении ",
    "1. СР",
    "2. ЛДПР",
    "3. ПР",
    "4. КПРФ",
    "5. ЯБЛОКО",
    "6. ЕР",
    "7. ПД",
];

/// Separator between ancestor names in a region path
/// (e.g. "Московская область - Балашихинская").
pub const REGION_NAME_SEPARATOR: &str = " - ";
