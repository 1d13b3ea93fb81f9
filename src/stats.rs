//! Pure summary calculators over the raw upstream record lists. Each one
//! is recomputed from scratch per request; nothing is cached.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

/// Price and sale-type statistics from a property's sale history.
///
/// Records are untyped upstream JSON; prices arrive as numeric strings and
/// unparseable ones are skipped without complaint. An empty history yields
/// an empty map.
pub fn property_summary(history: &[Value]) -> Map<String, Value> {
    let mut summary = Map::new();
    if history.is_empty() {
        return summary;
    }

    let mut prices: Vec<f64> = Vec::new();
    let mut sale_types: Map<String, Value> = Map::new();
    let mut dates: Vec<&str> = Vec::new();

    for record in history {
        if let Some(price) = parse_price(record) {
            prices.push(price);
        }

        let sale_type = record
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        let count = sale_types.get(sale_type).and_then(Value::as_u64).unwrap_or(0);
        sale_types.insert(sale_type.to_string(), json!(count + 1));

        if let Some(date) = record
            .get("date")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
        {
            dates.push(date);
        }
    }

    let address = history[0]
        .get("address")
        .and_then(Value::as_str)
        .unwrap_or("Unknown");

    summary.insert("total_records".to_string(), json!(history.len()));
    summary.insert("address".to_string(), json!(address));
    summary.insert("sale_types".to_string(), Value::Object(sale_types));

    if !prices.is_empty() {
        prices.sort_by(f64::total_cmp);
        let earliest = prices[0];
        let latest = prices[prices.len() - 1];

        summary.insert("latest_price".to_string(), json!(latest));
        summary.insert("earliest_price".to_string(), json!(earliest));
        // Lower median: element at len / 2 of the sorted list, never an
        // average of the two middle elements.
        summary.insert("median_price".to_string(), json!(prices[prices.len() / 2]));
        let avg = prices.iter().sum::<f64>() / prices.len() as f64;
        summary.insert("avg_price".to_string(), json!(avg));
        summary.insert("min_price".to_string(), json!(earliest));
        summary.insert("max_price".to_string(), json!(latest));

        // Growth is undefined from a zero base; the key is omitted then.
        if prices.len() > 1 && earliest != 0.0 {
            let growth = ((latest - earliest) / earliest) * 100.0;
            summary.insert(
                "price_growth_percent".to_string(),
                json!((growth * 100.0).round() / 100.0),
            );
        }
    }

    if !dates.is_empty() {
        // Lexicographic, not chronological; holds for ISO-style dates only.
        dates.sort_unstable();
        summary.insert("earliest_date".to_string(), json!(dates[0]));
        summary.insert("latest_date".to_string(), json!(dates[dates.len() - 1]));
    }

    summary
}

fn parse_price(record: &Value) -> Option<f64> {
    let price = match record.get("price")? {
        Value::String(s) if !s.is_empty() => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    // "NaN"/"inf" strings parse as floats but would poison the sort.
    price.is_finite().then_some(price)
}

/// Headline counts and catchment/level/sector breakdown for nearby schools.
///
/// Level classification is by substring, so one record can count toward
/// several levels or none. Sector counts only exact Public/Private matches.
pub fn schools_summary(schools: &[Value]) -> Map<String, Value> {
    let mut summary = Map::new();
    if schools.is_empty() {
        return summary;
    }

    let str_field = |record: &Value, key: &str| -> String {
        record
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };

    let in_catchment = schools
        .iter()
        .filter(|s| str_field(s, "in_catchment") == "Yes")
        .count();
    let count_level = |level: &str| {
        schools
            .iter()
            .filter(|s| str_field(s, "school_level_type").contains(level))
            .count()
    };
    let count_sector = |sector: &str| {
        schools
            .iter()
            .filter(|s| str_field(s, "school_sector_type") == sector)
            .count()
    };

    // Zero or missing distances drop out of both the sum and the count.
    let distances: Vec<f64> = schools
        .iter()
        .filter_map(|s| s.get("distance").and_then(Value::as_f64))
        .filter(|d| *d != 0.0)
        .collect();
    let avg_distance = if distances.is_empty() {
        0.0
    } else {
        distances.iter().sum::<f64>() / distances.len() as f64
    };

    summary.insert("total_schools".to_string(), json!(schools.len()));
    summary.insert("in_catchment".to_string(), json!(in_catchment));
    summary.insert("primary".to_string(), json!(count_level("Primary")));
    summary.insert("secondary".to_string(), json!(count_level("Secondary")));
    summary.insert("combined".to_string(), json!(count_level("Combined")));
    summary.insert("public".to_string(), json!(count_sector("Public")));
    summary.insert("private".to_string(), json!(count_sector("Private")));
    summary.insert(
        "avg_distance_meters".to_string(),
        json!(avg_distance.round() as i64),
    );

    summary
}

/// Top-5 ethnicities by average percentage across the surrounding areas.
///
/// An ethnicity's average is taken over the areas that report it; areas
/// that omit it do not drag the mean down with zeros. Ties keep first-seen
/// order (stable sort, no secondary key).
pub fn ethnicity_summary(areas: &[Value]) -> Map<String, Value> {
    let mut summary = Map::new();
    if areas.is_empty() {
        return summary;
    }

    let mut order: Vec<String> = Vec::new();
    let mut samples: HashMap<String, Vec<f64>> = HashMap::new();

    for area in areas {
        let Some(Value::Object(breakdown)) = area.get("ethnicity") else {
            continue;
        };
        for (name, percentage) in breakdown {
            let Some(percentage) = percentage.as_f64() else {
                continue;
            };
            if !samples.contains_key(name) {
                order.push(name.clone());
            }
            samples.entry(name.clone()).or_default().push(percentage);
        }
    }

    let mut averages: Vec<(String, f64)> = order
        .into_iter()
        .map(|name| {
            let values = &samples[&name];
            let avg = values.iter().sum::<f64>() / values.len() as f64;
            (name, avg)
        })
        .collect();
    averages.sort_by(|a, b| b.1.total_cmp(&a.1));

    let top: Vec<Value> = averages
        .into_iter()
        .take(5)
        .map(|(name, avg)| json!([name, avg]))
        .collect();

    summary.insert("top_ethnicities".to_string(), Value::Array(top));
    summary.insert("total_areas".to_string(), json!(areas.len()));

    summary
}
