use crate::model::aggregation::{AggregationBucket, ChartPoint};

/// One stacked bar per shift code, in the bucket's order.
pub fn project(bucket: &AggregationBucket) -> Vec<ChartPoint> {
    bucket
        .by_shift_gender
        .iter()
        .map(|(shift_code, counts)| ChartPoint {
            label: shift_code.to_string(),
            m: counts.male,
            f: counts.female,
        })
        .collect()
}
