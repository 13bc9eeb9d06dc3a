//! End-to-end wire vectors through the public API.
//!
//! Every case checks three things at once: the size query, the exact
//! encoded bytes, and the decode back to an equal value.

use zeitpack::{decode_date, decode_time, decode_timestamp, Temporal, Timezone};

fn assert_date_vector(value: &Temporal, expected: &[u8]) {
    assert_eq!(value.encoded_size(), expected.len(), "size for {value}");
    assert_eq!(value.encode_vec(), expected, "bytes for {value}");
    let (decoded, consumed) = decode_date(expected).unwrap();
    assert_eq!(consumed, expected.len(), "consumed for {value}");
    assert_eq!(&decoded, value, "decode for {value}");
}

fn assert_time_vector(value: &Temporal, expected: &[u8]) {
    assert_eq!(value.encoded_size(), expected.len(), "size for {value}");
    assert_eq!(value.encode_vec(), expected, "bytes for {value}");
    let (decoded, consumed) = decode_time(expected).unwrap();
    assert_eq!(consumed, expected.len(), "consumed for {value}");
    assert_eq!(&decoded, value, "decode for {value}");
}

fn assert_timestamp_vector(value: &Temporal, expected: &[u8]) {
    assert_eq!(value.encoded_size(), expected.len(), "size for {value}");
    assert_eq!(value.encode_vec(), expected, "bytes for {value}");
    let (decoded, consumed) = decode_timestamp(expected).unwrap();
    assert_eq!(consumed, expected.len(), "consumed for {value}");
    assert_eq!(&decoded, value, "decode for {value}");
}

#[test]
fn date_vectors() {
    assert_date_vector(
        &Temporal::date(2000, 1, 1).unwrap(),
        &[0x21, 0x00, 0x00],
    );
    assert_date_vector(
        &Temporal::date(-2000, 12, 21).unwrap(),
        &[0x95, 0x7F, 0x3E],
    );
}

#[test]
fn time_vectors() {
    assert_time_vector(
        &Temporal::time(8, 41, 5, 999_999_999, Timezone::Utc).unwrap(),
        &[0xFE, 0x4F, 0xD6, 0xDC, 0x8B, 0x14, 0xFD],
    );
    assert_time_vector(
        &Temporal::time(14, 18, 30, 43_000_000, Timezone::Utc).unwrap(),
        &[0x5A, 0xC1, 0x93, 0xDC],
    );
    assert_time_vector(
        &Temporal::time(23, 6, 55, 8_000, Timezone::Utc).unwrap(),
        &[0x44, 0x00, 0x80, 0xDB, 0xB8],
    );
    assert_time_vector(
        &Temporal::time(10, 10, 10, 0, Timezone::area_location("Asia/Tokyo").unwrap()).unwrap(),
        &[0x51, 0x14, 0xF5, 0x0E, b'S', b'/', b'T', b'o', b'k', b'y', b'o'],
    );
}

#[test]
fn timestamp_vectors() {
    assert_timestamp_vector(
        &Temporal::timestamp(
            2020,
            8,
            30,
            15,
            33,
            14,
            19_577_323,
            Timezone::area_location("Asia/Singapore").unwrap(),
        )
        .unwrap(),
        &[
            0x5F, 0xCF, 0x55, 0x09, 0x9C, 0xF0, 0x79, 0x44, 0x01, 0x16, b'S', b'/', b'S', b'i',
            b'n', b'g', b'a', b'p', b'o', b'r', b'e',
        ],
    );
    assert_timestamp_vector(
        &Temporal::timestamp(1966, 12, 1, 5, 13, 5, 0, Timezone::Utc).unwrap(),
        &[0x28, 0x9A, 0x12, 0x78, 0x08],
    );
    assert_timestamp_vector(
        &Temporal::timestamp(2000, 1, 1, 0, 0, 0, 1_000_000, Timezone::Utc).unwrap(),
        &[0x0A, 0x00, 0x00, 0x40, 0x08, 0x00],
    );
    assert_timestamp_vector(
        &Temporal::timestamp(2000, 1, 1, 0, 0, 0, 999, Timezone::Utc).unwrap(),
        &[0x3E, 0x1F, 0x00, 0x00, 0x00, 0x00, 0x84, 0x00, 0x00],
    );
    assert_timestamp_vector(
        &Temporal::timestamp(2000, 1, 1, 0, 0, 0, 0, Timezone::utc_offset(1000).unwrap())
            .unwrap(),
        &[0x01, 0x00, 0x10, 0x02, 0x00, 0x00, 0xE8, 0x03],
    );
    assert_timestamp_vector(
        &Temporal::timestamp(
            1998,
            1,
            7,
            8,
            19,
            20,
            0,
            Timezone::area_location("Europe/Berlin").unwrap(),
        )
        .unwrap(),
        &[0xA1, 0x26, 0x74, 0x62, 0x00, 0x10, b'E', b'/', b'B', b'e', b'r', b'l', b'i', b'n'],
    );
}

#[test]
fn zero_value_vectors() {
    assert_date_vector(&Temporal::zero_date(), &[0x00; 3]);
    assert_time_vector(&Temporal::zero_time(), &[0x00; 3]);
    assert_timestamp_vector(&Temporal::zero_timestamp(), &[0x00; 5]);
}

/// All UTC-alias spellings produce identical bytes.
#[test]
fn utc_aliases_encode_identically() {
    let reference = Temporal::timestamp(2000, 1, 1, 0, 0, 0, 0, Timezone::Utc)
        .unwrap()
        .encode_vec();
    assert_eq!(reference, [0x00, 0x00, 0x10, 0x02, 0x00]);

    for name in [
        "Etc/UTC",
        "Etc/GMT",
        "Etc/GMT+0",
        "Etc/GMT-0",
        "Etc/GMT0",
        "Etc/Greenwich",
        "Etc/UCT",
        "Etc/Universal",
        "Etc/Zulu",
        "Factory",
        "GMT",
        "GMT+0",
        "GMT-0",
        "GMT0",
        "Greenwich",
        "UCT",
        "Universal",
        "UTC",
        "Zulu",
        "Z",
        "Zero",
        "",
    ] {
        let aliased = Temporal::timestamp(
            2000,
            1,
            1,
            0,
            0,
            0,
            0,
            Timezone::area_location(name).unwrap(),
        )
        .unwrap();
        assert_eq!(aliased.encode_vec(), reference, "failed for {name:?}");
    }
}

/// `Local` and `L` both become the one-letter local zone on the wire.
#[test]
fn local_spellings_encode_identically() {
    let expected = [0x01, 0x00, 0x10, 0x02, 0x00, 0x02, b'L'];
    for name in ["Local", "L"] {
        let value = Temporal::timestamp(
            2000,
            1,
            1,
            0,
            0,
            0,
            0,
            Timezone::area_location(name).unwrap(),
        )
        .unwrap();
        assert_timestamp_vector(&value, &expected);
    }
}

/// Decoders consume exactly one value and leave trailing bytes alone.
#[test]
fn trailing_bytes_are_left_alone() {
    let mut bytes = Temporal::date(2000, 1, 1).unwrap().encode_vec();
    bytes.extend_from_slice(&[0xDE, 0xAD]);
    let (_, consumed) = decode_date(&bytes).unwrap();
    assert_eq!(consumed, 3);

    let mut bytes = Temporal::time(8, 41, 5, 999_999_999, Timezone::Utc)
        .unwrap()
        .encode_vec();
    bytes.push(0xFF);
    let (_, consumed) = decode_time(&bytes).unwrap();
    assert_eq!(consumed, 7);
}

/// Several values packed back to back decode in sequence.
#[test]
fn sequential_values_in_one_buffer() {
    let date = Temporal::date(2024, 2, 29).unwrap();
    let time = Temporal::time(23, 59, 60, 123_000, Timezone::utc_offset(-330).unwrap()).unwrap();
    let ts = Temporal::timestamp(
        1969,
        7,
        20,
        20,
        17,
        40,
        0,
        Timezone::area_location("America/New_York").unwrap(),
    )
    .unwrap();

    let mut buffer = Vec::new();
    buffer.extend_from_slice(&date.encode_vec());
    buffer.extend_from_slice(&time.encode_vec());
    buffer.extend_from_slice(&ts.encode_vec());

    let (decoded_date, n1) = decode_date(&buffer).unwrap();
    assert_eq!(decoded_date, date);
    let (decoded_time, n2) = decode_time(&buffer[n1..]).unwrap();
    assert_eq!(decoded_time, time);
    let (decoded_ts, n3) = decode_timestamp(&buffer[n1 + n2..]).unwrap();
    assert_eq!(decoded_ts, ts);
    assert_eq!(n1 + n2 + n3, buffer.len());
}

/// Encoding into a caller-provided scratch buffer of the documented maximum.
#[test]
fn max_encoded_size_scratch_buffer() {
    let name = format!("Antarctica/{}", "y".repeat(115));
    let ts = Temporal::timestamp(
        -131072,
        12,
        31,
        23,
        59,
        60,
        987_654_321,
        Timezone::area_location(&name).unwrap(),
    )
    .unwrap();
    let mut scratch = [0u8; zeitpack::MAX_ENCODED_SIZE];
    let written = ts.encode_to(&mut scratch).unwrap();
    let (decoded, consumed) = decode_timestamp(&scratch[..written]).unwrap();
    assert_eq!(consumed, written);
    assert_eq!(decoded, ts);
}
