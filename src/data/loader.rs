use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::model::{
    CAMPAIGN_NAME, CampaignDataset, CampaignRecord, Column, RateMetric, SEND_DATE,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading campaign file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a valid send date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}, {column}: '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<CampaignDataset>>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<CampaignDataset>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load a campaign file once per process.
///
/// Later calls with the same path return the cached dataset without touching
/// the file. Failures are not cached.
pub fn load_cached(path: &Path) -> Result<Arc<CampaignDataset>, LoadError> {
    let mut guard = cache().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(ds) = guard.get(path) {
        log::debug!("Campaign data for {} served from cache", path.display());
        return Ok(Arc::clone(ds));
    }
    let dataset = Arc::new(load_csv(path)?);
    guard.insert(path.to_path_buf(), Arc::clone(&dataset));
    Ok(dataset)
}

/// Read a campaign CSV from disk.
pub fn load_csv(path: &Path) -> Result<CampaignDataset, LoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

/// CSV layout: header row with at least the six campaign columns.
/// Any other columns are kept verbatim as extra text.
pub fn load_from_reader<R: Read>(source: R) -> Result<CampaignDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let name_idx = position(CAMPAIGN_NAME)?;
    let date_idx = position(SEND_DATE)?;
    let mut rate_idx = [0usize; 4];
    for metric in RateMetric::ALL {
        rate_idx[metric.index()] = position(metric.header())?;
    }

    let mut extra_count = 0;
    let columns: Vec<Column> = (0..headers.len())
        .map(|i| {
            if i == name_idx {
                Column::CampaignName
            } else if i == date_idx {
                Column::SendDate
            } else if let Some(metric) = RateMetric::ALL
                .into_iter()
                .find(|m| rate_idx[m.index()] == i)
            {
                Column::Rate(metric)
            } else {
                extra_count += 1;
                Column::Extra(extra_count - 1)
            }
        })
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_no + 1;

        let campaign_name = record.get(name_idx).unwrap_or("").to_string();
        let send_date = parse_send_date(record.get(date_idx).unwrap_or(""), row)?;

        let mut rates = [f64::NAN; 4];
        for metric in RateMetric::ALL {
            let raw = record.get(rate_idx[metric.index()]).unwrap_or("");
            rates[metric.index()] = parse_rate(raw, row, metric)?;
        }

        let extra = columns
            .iter()
            .zip(record.iter())
            .filter(|(col, _)| matches!(col, Column::Extra(_)))
            .map(|(_, value)| value.to_string())
            .collect();

        records.push(CampaignRecord {
            campaign_name,
            send_date,
            rates,
            extra,
        });
    }

    Ok(CampaignDataset::with_columns(headers, columns, records))
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

/// Cell texts read as a missing value, matching the usual dataframe defaults.
const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Extra markers accepted in the send-date column only.
const NA_DATES: [&str; 2] = ["NaT", "nat"];

fn is_missing(s: &str) -> bool {
    NA_VALUES.contains(&s)
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Missing-value cells become `None`; time-of-day parts are dropped.
fn parse_send_date(s: &str, row: usize) -> Result<Option<NaiveDate>, LoadError> {
    let s = s.trim();
    if is_missing(s) || NA_DATES.contains(&s) {
        return Ok(None);
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(Some(d));
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Some(dt.date()));
        }
    }
    Err(LoadError::InvalidDate {
        row,
        value: s.to_string(),
    })
}

/// Missing-value cells become NaN.
fn parse_rate(s: &str, row: usize, metric: RateMetric) -> Result<f64, LoadError> {
    let s = s.trim();
    if is_missing(s) {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        row,
        column: metric.header(),
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Campaign Name,Send Date,Open Rate (%),Click Rate (%),Unsubscribe Rate (%),Bounce Rate (%)";

    fn load(body: &str) -> Result<CampaignDataset, LoadError> {
        load_from_reader(format!("{HEADER}\n{body}").as_bytes())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_standard_layout() {
        let ds = load("Welcome,2024-01-01,20.5,3.1,0.2,1.4\nPromo,2024-02-01,40,4,0.3,2\n").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].campaign_name, "Welcome");
        assert_eq!(ds.records[0].send_date, Some(date(2024, 1, 1)));
        assert_eq!(ds.records[0].rates, [20.5, 3.1, 0.2, 1.4]);
        assert_eq!(ds.campaign_names, vec!["Welcome", "Promo"]);
        assert_eq!(ds.date_bounds, Some((date(2024, 1, 1), date(2024, 2, 1))));
        assert_eq!(ds.columns.len(), 6);
    }

    #[test]
    fn accepts_common_date_forms() {
        let ds = load(concat!(
            "A,2024-03-05 10:30:00,1,1,1,1\n",
            "A,2024-03-06T08:00:00,1,1,1,1\n",
            "A,2024/03/07,1,1,1,1\n",
            "A,03/08/2024,1,1,1,1\n",
        ))
        .unwrap();
        let dates: Vec<_> = ds.records.iter().map(|r| r.send_date.unwrap()).collect();
        assert_eq!(
            dates,
            vec![date(2024, 3, 5), date(2024, 3, 6), date(2024, 3, 7), date(2024, 3, 8)]
        );
    }

    #[test]
    fn empty_cells_are_missing_values() {
        let ds = load("A,,20,,1,1\n").unwrap();
        assert_eq!(ds.records[0].send_date, None);
        assert!(ds.records[0].rate(RateMetric::Click).is_nan());
        assert_eq!(ds.date_bounds, None);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = load_from_reader("Campaign Name,Send Date,Open Rate (%)\nA,2024-01-01,1\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Click Rate (%)")), "{err}");
    }

    #[test]
    fn non_numeric_rate_fails_the_load() {
        let err = load("A,2024-01-01,20,abc,1,1\n").unwrap_err();
        match err {
            LoadError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "Click Rate (%)");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn na_markers_load_as_missing() {
        for marker in ["N/A", "NA", "n/a", "#N/A", "null", "NULL", "None", "NaN", "<NA>", "-NaN"] {
            let ds = load(&format!("A,2024-01-01,20,{marker},1,1\n"))
                .unwrap_or_else(|e| panic!("{marker}: {e}"));
            assert!(ds.records[0].rate(RateMetric::Click).is_nan(), "{marker}");
            assert_eq!(ds.records[0].rate(RateMetric::Open), 20.0);
        }

        let ds = load("A,NaT,20,1,1,1\nB,2024-01-02,40,1,1,1\n").unwrap();
        assert_eq!(ds.records[0].send_date, None);
        assert_eq!(ds.date_bounds, Some((date(2024, 1, 2), date(2024, 1, 2))));
    }

    #[test]
    fn bad_date_fails_the_load() {
        let err = load("A,2024-01-01,1,1,1,1\nB,last tuesday,1,1,1,1\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 2, .. }), "{err}");
    }

    #[test]
    fn ragged_row_fails_the_load() {
        let err = load("A,2024-01-01,1,1\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err}");
    }

    #[test]
    fn extra_columns_are_kept_in_file_order() {
        let csv = "Segment,Campaign Name,Send Date,Open Rate (%),Click Rate (%),Unsubscribe Rate (%),Bounce Rate (%),Owner\n\
                   VIP,A,2024-01-01,1,2,3,4,Dana\n";
        let ds = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.columns[0], Column::Extra(0));
        assert_eq!(ds.columns[7], Column::Extra(1));
        assert_eq!(ds.records[0].extra, vec!["VIP", "Dana"]);
        assert_eq!(ds.records[0].rates, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)), "{err}");
    }

    #[test]
    fn cache_does_not_reread_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaigns.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}\nA,2024-01-01,1,1,1,1").unwrap();
        drop(file);

        let first = load_cached(&path).unwrap();
        std::fs::write(&path, "garbage").unwrap();
        let second = load_cached(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        assert!(load_cached(&path).is_err());
        std::fs::write(&path, format!("{HEADER}\nA,2024-01-01,1,1,1,1\n")).unwrap();
        assert_eq!(load_cached(&path).unwrap().len(), 1);
    }
}
