use crate::domain::model::RawMatch;
use crate::utils::error::Result;

/// Parse a season CSV (one row per match). Columns not used by the schema are ignored.
pub fn parse_season_csv(data: &[u8]) -> Result<Vec<RawMatch>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let mut records = Vec::new();
    for record in reader.deserialize::<RawMatch>() {
        records.push(record?);
    }
    Ok(records)
}
