// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

//! Record packaging: turns an ordered batch of log records into
//! gzip-compressed, size-bounded JSON payloads ready for transmission.

use std::io::Write;

use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::PackagingError;

/// A single structured log record, as handed over by the upstream collector.
///
/// Records are opaque JSON objects; the shipper never inspects or rewrites
/// their fields.
pub type LogRecord = serde_json::Map<String, serde_json::Value>;

/// Maximum serialized size of one payload, in bytes.
///
/// This is the request-body limit accepted by the log intake. The bound is
/// enforced on the serialized JSON array; its gzip output lands below it.
pub const MAX_PAYLOAD_SIZE: usize = 1_000_000;

/// One compressed, serialized batch of log records, ready for transmission.
#[derive(Debug)]
pub struct Payload {
    body: Bytes,
    record_count: usize,
}

impl Payload {
    /// Number of records carried by this payload.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Compressed size in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Consumes the payload, yielding the compressed request body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Packages an ordered batch of records into one or more payloads.
///
/// Records are serialized individually and grouped greedily in input order:
/// a group is closed as soon as appending the next record would push the
/// serialized JSON array past [`MAX_PAYLOAD_SIZE`]. A record that exceeds
/// the cap on its own is still emitted alone as a best-effort payload;
/// records are never split. An empty batch yields no payloads.
///
/// Any serialization or compression failure fails the whole batch; no
/// partial payload sequence is returned.
pub fn package_records(records: &[LogRecord]) -> Result<Vec<Payload>, PackagingError> {
    let mut payloads = Vec::new();
    let mut group: Vec<Vec<u8>> = Vec::new();
    // Running size of the group serialized as a JSON array: two brackets
    // plus one comma between adjacent records.
    let mut group_size = 2;

    for record in records {
        let encoded = serde_json::to_vec(record)?;
        if !group.is_empty() && group_size + encoded.len() + 1 > MAX_PAYLOAD_SIZE {
            payloads.push(seal_group(&group)?);
            group.clear();
            group_size = 2;
        }
        if !group.is_empty() {
            group_size += 1;
        }
        group_size += encoded.len();
        group.push(encoded);
    }

    if !group.is_empty() {
        payloads.push(seal_group(&group)?);
    }

    Ok(payloads)
}

/// Serializes a closed group as one JSON array and gzip-compresses it.
fn seal_group(group: &[Vec<u8>]) -> Result<Payload, PackagingError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(b"[")?;
    for (i, encoded) in group.iter().enumerate() {
        if i > 0 {
            encoder.write_all(b",")?;
        }
        encoder.write_all(encoded)?;
    }
    encoder.write_all(b"]")?;
    let compressed = encoder.finish()?;

    Ok(Payload {
        body: Bytes::from(compressed),
        record_count: group.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use serde_json::{json, Value};
    use std::io::Read;

    fn record(value: Value) -> LogRecord {
        value
            .as_object()
            .cloned()
            .expect("test record must be a JSON object")
    }

    fn unpack(payload: Payload) -> Vec<LogRecord> {
        let body = payload.into_body();
        let mut decoder = GzDecoder::new(&body[..]);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .expect("payload must be valid gzip");
        serde_json::from_slice(&decompressed).expect("payload must decode as a JSON array")
    }

    #[test]
    fn empty_batch_yields_no_payloads() {
        let payloads = package_records(&[]).expect("packaging failed");
        assert!(payloads.is_empty());
    }

    #[test]
    fn small_batch_fits_one_payload() {
        let records = vec![
            record(json!({"message": "first", "level": "info"})),
            record(json!({"message": "second", "level": "warn"})),
        ];

        let payloads = package_records(&records).expect("packaging failed");

        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].record_count(), 2);
        let payload = payloads.into_iter().next().expect("payload missing");
        assert_eq!(unpack(payload), records);
    }

    #[test]
    fn grouping_preserves_order_across_payloads() {
        // Four ~300 KB records: the first three fill a payload, the fourth
        // starts the next one.
        let records: Vec<LogRecord> = (0..4)
            .map(|i| record(json!({"index": i, "message": "x".repeat(300_000)})))
            .collect();

        let payloads = package_records(&records).expect("packaging failed");

        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0].record_count(), 3);
        assert_eq!(payloads[1].record_count(), 1);
        for payload in &payloads {
            assert!(payload.len() <= MAX_PAYLOAD_SIZE);
        }

        let unpacked: Vec<LogRecord> = payloads.into_iter().flat_map(unpack).collect();
        assert_eq!(unpacked, records);
    }

    #[test]
    fn oversized_record_is_emitted_alone() {
        let records = vec![
            record(json!({"message": "before"})),
            record(json!({"message": "y".repeat(2 * MAX_PAYLOAD_SIZE)})),
            record(json!({"message": "after"})),
        ];

        let payloads = package_records(&records).expect("packaging failed");

        assert_eq!(payloads.len(), 3);
        assert_eq!(payloads[1].record_count(), 1);

        let unpacked: Vec<LogRecord> = payloads.into_iter().flat_map(unpack).collect();
        assert_eq!(unpacked, records);
    }

    #[test]
    fn compressed_payloads_respect_size_bound() {
        let records: Vec<LogRecord> = (0..8)
            .map(|i| record(json!({"index": i, "message": "z".repeat(250_000)})))
            .collect();

        let payloads = package_records(&records).expect("packaging failed");

        assert!(payloads.len() > 1);
        for payload in &payloads {
            assert!(payload.len() <= MAX_PAYLOAD_SIZE);
        }
    }
}
