//! MERRA-2 granule URL construction.

/// GES DISC base for the MERRA-2 monthly collections.
pub const GESDISC_BASE: &str = "https://data.gesdisc.earthdata.nasa.gov/data/MERRA2_MONTHLY";

/// MERRA-2 production stream number for a given year. Granule filenames
/// embed the stream, which changed at fixed reprocessing boundaries.
pub fn merra2_stream(year: i32) -> u32 {
    match year {
        ..=1991 => 100,
        1992..=2000 => 200,
        2001..=2010 => 300,
        _ => 400,
    }
}

/// Builds one URL per month of every year in `years` for a monthly
/// collection, e.g. collection `M2TMNXLND.5.12.4` with short name
/// `tavgM_2d_lnd_Nx`.
pub fn monthly_granule_urls(
    collection: &str,
    short_name: &str,
    years: impl IntoIterator<Item = i32>,
) -> Vec<String> {
    let mut urls = Vec::new();
    for year in years {
        let stream = merra2_stream(year);
        for month in 1..=12 {
            urls.push(format!(
                "{GESDISC_BASE}/{collection}/{year}/MERRA2_{stream}.{short_name}.{year:04}{month:02}.nc4"
            ));
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_numbers_follow_reprocessing_boundaries() {
        assert_eq!(merra2_stream(1980), 100);
        assert_eq!(merra2_stream(1991), 100);
        assert_eq!(merra2_stream(1992), 200);
        assert_eq!(merra2_stream(2000), 200);
        assert_eq!(merra2_stream(2001), 300);
        assert_eq!(merra2_stream(2010), 300);
        assert_eq!(merra2_stream(2011), 400);
        assert_eq!(merra2_stream(2024), 400);
    }

    #[test]
    fn builds_twelve_urls_per_year() {
        let urls = monthly_granule_urls("M2TMNXLND.5.12.4", "tavgM_2d_lnd_Nx", [2015, 2016]);
        assert_eq!(urls.len(), 24);
        assert_eq!(
            urls[7],
            "https://data.gesdisc.earthdata.nasa.gov/data/MERRA2_MONTHLY/\
             M2TMNXLND.5.12.4/2015/MERRA2_400.tavgM_2d_lnd_Nx.201508.nc4"
        );
        assert!(urls[12].contains("/2016/"));
    }
}
