// Std library crates
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

// External crates
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use binance_sdk::config::ConfigurationRestApi;
use binance_sdk::spot::{
    SpotRestApi,
    rest_api::{
        KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi, TickerPriceParams,
        TickerPriceResponse,
    },
};
use binance_sdk::errors::ConnectorError;

// Local crates
use crate::config::{BINANCE, BinanceApiConfig};
use crate::data::MarketDataSource;
use crate::domain::pair_interval::PairInterval;
use crate::models::OhlcvSeries;
use crate::utils::TimeUtils;

/// Map our millisecond interval widths onto the SDK's interval enum.
pub fn try_interval_from_ms(ms: i64) -> Result<KlinesIntervalEnum> {
    match ms {
        TimeUtils::MS_IN_S => Ok(KlinesIntervalEnum::Interval1s),
        TimeUtils::MS_IN_MIN => Ok(KlinesIntervalEnum::Interval1m),
        TimeUtils::MS_IN_5_MIN => Ok(KlinesIntervalEnum::Interval5m),
        TimeUtils::MS_IN_15_MIN => Ok(KlinesIntervalEnum::Interval15m),
        TimeUtils::MS_IN_30_MIN => Ok(KlinesIntervalEnum::Interval30m),
        TimeUtils::MS_IN_H => Ok(KlinesIntervalEnum::Interval1h),
        TimeUtils::MS_IN_2_H => Ok(KlinesIntervalEnum::Interval2h),
        TimeUtils::MS_IN_4_H => Ok(KlinesIntervalEnum::Interval4h),
        TimeUtils::MS_IN_6_H => Ok(KlinesIntervalEnum::Interval6h),
        TimeUtils::MS_IN_12_H => Ok(KlinesIntervalEnum::Interval12h),
        TimeUtils::MS_IN_D => Ok(KlinesIntervalEnum::Interval1d),
        TimeUtils::MS_IN_W => Ok(KlinesIntervalEnum::Interval1w),
        _ => Err(anyhow!("Unsupported interval: {}ms", ms)),
    }
}

// Custom error type for kline decoding, for better error messages.
#[derive(Debug)]
pub enum KlineDataError {
    InvalidLength,
    InvalidType(String),
    MissingField(String),
}

impl fmt::Display for KlineDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            KlineDataError::InvalidLength => write!(f, "Invalid kline row length"),
            KlineDataError::InvalidType(field) => write!(f, "Invalid type for {}", field),
            KlineDataError::MissingField(field) => write!(f, "Missing {} in kline row", field),
        }
    }
}

impl Error for KlineDataError {}

/// One decoded kline row. The SDK hands back rows of heterogeneous
/// integer/string cells; this is the typed version we keep.
#[derive(Debug, PartialEq)]
struct KlineRow {
    open_timestamp_ms: i64,
    open_price: f64,
    high_price: f64,
    low_price: f64,
    close_price: f64,
    base_asset_volume: f64,
    quote_asset_volume: f64,
}

// Pull an f64 out of the String cell variant; None for any other shape.
fn parse_price_cell(cell: Option<KlinesItemInner>) -> Option<f64> {
    cell.and_then(|inner| {
        if let KlinesItemInner::String(s) = inner {
            s.parse::<f64>().ok()
        } else {
            None
        }
    })
}

fn take_price(
    items: &mut impl Iterator<Item = KlinesItemInner>,
    field: &str,
) -> Result<f64, KlineDataError> {
    parse_price_cell(items.next()).ok_or_else(|| KlineDataError::MissingField(field.to_string()))
}

impl TryFrom<Vec<KlinesItemInner>> for KlineRow {
    type Error = KlineDataError;

    fn try_from(cells: Vec<KlinesItemInner>) -> Result<Self, Self::Error> {
        // Binance kline rows carry 12 cells; we consume the first 8.
        if cells.len() < 8 {
            return Err(KlineDataError::InvalidLength);
        }

        let mut items = cells.into_iter();
        let open_timestamp_ms = match items.next().ok_or(KlineDataError::InvalidLength)? {
            KlinesItemInner::Integer(ts) => ts,
            _ => return Err(KlineDataError::InvalidType("open_time".to_string())),
        };

        let open_price = take_price(&mut items, "open")?;
        let high_price = take_price(&mut items, "high")?;
        let low_price = take_price(&mut items, "low")?;
        let close_price = take_price(&mut items, "close")?;
        let base_asset_volume = take_price(&mut items, "volume")?;
        let _ = items.next(); // close_time, unused
        let quote_asset_volume = take_price(&mut items, "quote_volume")?;

        Ok(KlineRow {
            open_timestamp_ms,
            open_price,
            high_price,
            low_price,
            close_price,
            base_asset_volume,
            quote_asset_volume,
        })
    }
}

fn convert_klines(data: Vec<Vec<KlinesItemInner>>) -> Result<Vec<KlineRow>, KlineDataError> {
    data.into_iter().map(Vec::try_into).collect()
}

fn series_from_rows(pair: &PairInterval, rows: Vec<KlineRow>) -> Result<OhlcvSeries> {
    if rows.is_empty() {
        bail!("{}: Binance returned zero klines", pair);
    }

    let first_kline_timestamp_ms = rows[0].open_timestamp_ms;
    let mut series = OhlcvSeries {
        pair_interval: pair.clone(),
        first_kline_timestamp_ms,
        open_prices: Vec::with_capacity(rows.len()),
        high_prices: Vec::with_capacity(rows.len()),
        low_prices: Vec::with_capacity(rows.len()),
        close_prices: Vec::with_capacity(rows.len()),
        base_asset_volumes: Vec::with_capacity(rows.len()),
        quote_asset_volumes: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        series.open_prices.push(row.open_price);
        series.high_prices.push(row.high_price);
        series.low_prices.push(row.low_price);
        series.close_prices.push(row.close_price);
        series.base_asset_volumes.push(row.base_asset_volume);
        series.quote_asset_volumes.push(row.quote_asset_volume);
    }

    Ok(series)
}

fn log_connector_error(context: &str, e: &anyhow::Error) {
    if let Some(conn_err) = e.downcast_ref::<ConnectorError>() {
        match conn_err {
            ConnectorError::TooManyRequestsError(msg) => {
                log::error!("{} Rate limit exceeded. Please wait and try again. {}", context, msg);
            }
            ConnectorError::RateLimitBanError(msg) => {
                log::error!("{} IP address banned due to excessive rate limits. {}", context, msg);
            }
            ConnectorError::ServerError { msg, status_code } => {
                log::error!("{} Server error: {} (status code: {:?})", context, msg, status_code);
            }
            ConnectorError::NetworkError(msg) => {
                log::error!("{} Network error: Check your internet connection. {}", context, msg);
            }
            other => {
                log::error!("{} Binance connector error: {:?}", context, other);
            }
        }
    } else {
        log::error!("{} Unexpected error: {:#}", context, e);
    }
}

/// Market data source backed by the Binance spot REST API.
pub struct BinanceMarketData {
    client: RestApi,
}

impl BinanceMarketData {
    /// Build the REST client with the configured timeout/retry/backoff.
    /// Transient-failure retries live in the SDK client, not in the loop.
    pub fn connect() -> Result<Self> {
        let config = BinanceApiConfig::default();
        let rest_conf = ConfigurationRestApi::builder()
            .timeout(config.timeout_ms)
            .retries(config.retries)
            .backoff(config.backoff_ms)
            .build()?;
        let client = SpotRestApi::production(rest_conf);
        Ok(Self { client })
    }
}

#[async_trait]
impl MarketDataSource for BinanceMarketData {
    async fn fetch_ohlcv(&self, pair: &PairInterval, limit: i32) -> Result<OhlcvSeries> {
        let limit = limit.min(BINANCE.limits.klines_limit_max);
        let params = KlinesParams::builder(
            pair.bn_name().to_string(),
            try_interval_from_ms(pair.interval_ms)?,
        )
        .limit(limit)
        .build()?;

        let response = match self.client.klines(params).await {
            Ok(r) => r,
            Err(e) => {
                log_connector_error(pair.bn_name(), &e);
                return Err(e).with_context(|| format!("Binance klines call failed for {}", pair));
            }
        };
        let raw_rows = response
            .data()
            .await
            .with_context(|| format!("failed to decode klines payload for {}", pair))?;

        let rows = convert_klines(raw_rows)
            .map_err(|e| anyhow::Error::new(e).context(format!("{} convert_klines failed", pair)))?;

        series_from_rows(pair, rows)
    }

    async fn fetch_last_price(&self, symbol: &str) -> Result<f64> {
        let params = TickerPriceParams {
            symbol: Some(symbol.to_string()),
            symbols: None,
            symbol_status: None,
        };

        let response = match self.client.ticker_price(params).await {
            Ok(r) => r,
            Err(e) => {
                log_connector_error(symbol, &e);
                return Err(e).with_context(|| format!("Binance ticker call failed for {}", symbol));
            }
        };
        let ticker = response
            .data()
            .await
            .with_context(|| format!("failed to decode ticker payload for {}", symbol))?;

        let price_text = match ticker {
            TickerPriceResponse::TickerPriceResponse1(single) => single
                .price
                .ok_or_else(|| anyhow!("{}: ticker response carried no price", symbol))?,
            // Asking for one symbol should not produce the batch shape, but
            // handle it anyway by picking the matching entry.
            TickerPriceResponse::TickerPriceResponse2(all) => all
                .into_iter()
                .find(|t| t.symbol.as_deref() == Some(symbol))
                .and_then(|t| t.price)
                .ok_or_else(|| anyhow!("{}: not present in batch ticker response", symbol))?,
            _ => bail!("{}: unexpected ticker response shape", symbol),
        };

        price_text
            .parse::<f64>()
            .with_context(|| format!("{}: unparseable ticker price '{}'", symbol, price_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_cells(ts: i64, o: &str, h: &str, l: &str, c: &str) -> Vec<KlinesItemInner> {
        vec![
            KlinesItemInner::Integer(ts),
            KlinesItemInner::String(o.to_string()),
            KlinesItemInner::String(h.to_string()),
            KlinesItemInner::String(l.to_string()),
            KlinesItemInner::String(c.to_string()),
            KlinesItemInner::String("12.5".to_string()),
            KlinesItemInner::Integer(ts + 59_999),
            KlinesItemInner::String("1250000.0".to_string()),
        ]
    }

    #[test]
    fn decodes_a_well_formed_kline_row() {
        let row = KlineRow::try_from(row_cells(1_700_000_000_000, "100", "105", "99", "104"))
            .expect("well-formed row must decode");
        assert_eq!(row.open_timestamp_ms, 1_700_000_000_000);
        assert_eq!(row.low_price, 99.0);
        assert_eq!(row.high_price, 105.0);
    }

    #[test]
    fn short_row_is_rejected() {
        let cells = vec![KlinesItemInner::Integer(0)];
        assert!(matches!(
            KlineRow::try_from(cells),
            Err(KlineDataError::InvalidLength)
        ));
    }

    #[test]
    fn non_numeric_price_cell_is_rejected() {
        let mut cells = row_cells(0, "100", "105", "99", "104");
        cells[2] = KlinesItemInner::String("not-a-price".to_string());
        assert!(matches!(
            KlineRow::try_from(cells),
            Err(KlineDataError::MissingField(field)) if field == "high"
        ));
    }

    #[test]
    fn series_preserves_row_order_and_first_timestamp() {
        let pair = PairInterval::new("BTCUSDT", TimeUtils::MS_IN_MIN);
        let rows = vec![
            KlineRow::try_from(row_cells(1_000, "1", "2", "0.5", "1.5")).unwrap(),
            KlineRow::try_from(row_cells(61_000, "1.5", "3", "1.0", "2.5")).unwrap(),
        ];
        let series = series_from_rows(&pair, rows).unwrap();
        assert_eq!(series.first_kline_timestamp_ms, 1_000);
        assert_eq!(series.low_prices, vec![0.5, 1.0]);
        assert_eq!(series.high_prices, vec![2.0, 3.0]);
    }

    #[test]
    fn empty_series_is_an_error() {
        let pair = PairInterval::new("BTCUSDT", TimeUtils::MS_IN_MIN);
        assert!(series_from_rows(&pair, Vec::new()).is_err());
    }

    #[test]
    fn watchlist_intervals_map_onto_sdk_enum() {
        for &ms in crate::config::MONITOR.watchlist.intervals_ms {
            assert!(try_interval_from_ms(ms).is_ok(), "interval {}ms must map", ms);
        }
        assert!(try_interval_from_ms(12345).is_err());
    }
}
