mod common;

use common::{utf16, Group, ScelBuilder};
use scel_reader::export::text;
use scel_reader::{
    Entry, PinyinTableEnd, ReadOptions, ScelError, ScelReader, ScelVariant, Termination,
};

const RECORDS: u64 = 0x2628;

fn open(bytes: Vec<u8>) -> ScelReader {
    ScelReader::from_bytes(bytes, ReadOptions::default()).expect("open scel")
}

fn pair(pinyin: &str, word: &str) -> Entry {
    Entry {
        pinyin: pinyin.to_string(),
        word: word.to_string(),
    }
}

/// ni_hao table plus two groups: `你好` (26 bytes), then `好`/`号` (38 bytes).
fn two_groups() -> ScelBuilder {
    ScelBuilder::ni_hao()
        .group(Group::new(&[1, 2], &["你好"]))
        .group(Group::new(&[2], &["好", "号"]))
}

#[test]
fn minimal_container_decodes_one_pair() {
    let reader = open(ScelBuilder::ni_hao().group(Group::new(&[1, 2], &["你好"])).build());
    assert_eq!(reader.variant, ScelVariant::Tag44);
    assert_eq!(reader.pinyin_table().len(), 3);

    let scan = reader.scan();
    assert_eq!(scan.entries, vec![pair("ni hao", "你好")]);
    assert_eq!(scan.termination, Termination::EndOfFile);
    assert_eq!(text::serialize(&scan.entries), "你好\tni hao");
}

#[test]
fn tag_45_reads_records_from_its_own_offset() {
    let mut builder = ScelBuilder::new(0x45).pinyin(&[(1, "ni"), (2, "hao"), (3, "zuo")]);
    builder = builder.group(Group::new(&[1, 2], &["你好", "妮好"]));
    let reader = open(builder.build());
    assert_eq!(reader.variant, ScelVariant::Tag45);
    assert_eq!(reader.variant.records_offset(), 0x26c4);

    let scan = reader.scan();
    assert_eq!(scan.entries, vec![pair("ni hao", "你好"), pair("ni hao", "妮好")]);
}

#[test]
fn records_keep_on_disk_order() {
    let scan = open(two_groups().build()).scan();
    assert_eq!(
        scan.entries,
        vec![pair("ni hao", "你好"), pair("hao", "好"), pair("hao", "号")]
    );
}

#[test]
fn truncation_mid_word_keeps_completed_words() {
    let mut bytes = two_groups().build();
    // cut into the extension block of the last word
    bytes.truncate(bytes.len() - 5);
    let len = bytes.len() as u64;
    let reader = open(bytes);

    let mut iter = reader.iter_entries();
    let entries: Vec<Entry> = iter.by_ref().collect();
    assert_eq!(entries, vec![pair("ni hao", "你好"), pair("hao", "好")]);
    assert!(matches!(iter.termination(), Some(Termination::Truncated { .. })));
    assert!(iter.position() <= len);
}

#[test]
fn truncation_in_group_header_keeps_previous_groups() {
    let mut bytes = two_groups().build();
    bytes.truncate(RECORDS as usize + 26 + 3);
    let scan = open(bytes).scan();
    assert_eq!(scan.entries, vec![pair("ni hao", "你好")]);
    assert_eq!(
        scan.termination,
        Termination::Truncated { offset: RECORDS + 26 + 2 }
    );
}

#[test]
fn missing_pinyin_index_stops_scan_without_error() {
    let bytes = ScelBuilder::ni_hao()
        .group(Group::new(&[1, 2], &["你好"]))
        .group(Group::new(&[2, 9], &["好久"]))
        .group(Group::new(&[1], &["你"]))
        .build();
    let scan = open(bytes).scan();
    assert_eq!(scan.entries, vec![pair("ni hao", "你好")]);
    assert_eq!(
        scan.termination,
        Termination::MissingPinyin { index: 9, offset: RECORDS + 26 + 4 + 2 }
    );
    assert!(scan.termination.is_structural());
}

#[test]
fn zero_word_group_is_skipped() {
    let bytes = ScelBuilder::ni_hao()
        .group(Group::new(&[1], &[]))
        .group(Group::new(&[1, 2], &["你好"]))
        .build();
    let scan = open(bytes).scan();
    assert_eq!(scan.entries, vec![pair("ni hao", "你好")]);
    assert_eq!(scan.termination, Termination::EndOfFile);
}

#[test]
fn invalid_word_keeps_earlier_entries() {
    let bytes = ScelBuilder::ni_hao()
        .group(Group::new(&[1, 2], &["你好"]))
        .group(Group::raw(&[1], vec![vec![0x00, 0xD8]]))
        .build();
    let scan = open(bytes).scan();
    assert_eq!(scan.entries, vec![pair("ni hao", "你好")]);
    assert_eq!(
        scan.termination,
        Termination::InvalidEncoding { offset: RECORDS + 26 + 4 + 2 + 2 }
    );
    assert!(!scan.termination.is_structural());
}

#[test]
fn odd_word_length_is_invalid_encoding() {
    let bytes = ScelBuilder::ni_hao()
        .group(Group::raw(&[1], vec![vec![0x60, 0x4F, 0x7D]]))
        .build();
    let scan = open(bytes).scan();
    assert!(scan.entries.is_empty());
    assert!(matches!(scan.termination, Termination::InvalidEncoding { .. }));
}

#[test]
fn records_offset_past_end_of_file_is_truncation() {
    // tag 0x45 file cut between the two records offsets
    let mut bytes = ScelBuilder::new(0x45).pinyin(&[(1, "zuo")]).build();
    bytes.truncate(0x2640);
    let scan = open(bytes).scan();
    assert!(scan.entries.is_empty());
    assert_eq!(scan.termination, Termination::Truncated { offset: 0x26c4 });
}

#[test]
fn empty_record_table_ends_at_eof() {
    let scan = open(ScelBuilder::ni_hao().build()).scan();
    assert!(scan.entries.is_empty());
    assert_eq!(scan.termination, Termination::EndOfFile);
}

#[test]
fn file_smaller_than_records_offset_is_rejected() {
    let mut bytes = ScelBuilder::ni_hao().build();
    bytes.truncate(RECORDS as usize - 1);
    match ScelReader::from_bytes(bytes, ReadOptions::default()) {
        Err(ScelError::FileTooSmall { size, minimum }) => {
            assert_eq!(size, RECORDS - 1);
            assert_eq!(minimum, RECORDS);
        }
        other => panic!("expected FileTooSmall, got {:?}", other),
    }
}

#[test]
fn unknown_tag_is_rejected() {
    let bytes = ScelBuilder::new(0x46).pinyin(&[(1, "zuo")]).build();
    assert!(matches!(
        ScelReader::from_bytes(bytes, ReadOptions::default()),
        Err(ScelError::UnsupportedFormat { tag: Some(0x46) })
    ));
}

#[test]
fn duplicate_pinyin_index_keeps_first_syllable() {
    let bytes = ScelBuilder::new(0x44)
        .pinyin(&[(1, "ni"), (1, "wo"), (2, "hao"), (3, "zuo")])
        .group(Group::new(&[1, 2], &["你好"]))
        .build();
    let reader = open(bytes);
    assert_eq!(reader.pinyin_table().get(1), Some("ni"));
    assert_eq!(reader.scan().entries, vec![pair("ni hao", "你好")]);
}

#[test]
fn sentinel_stops_pinyin_table() {
    // the entry after "zuo" is never read, so its index stays unknown
    let bytes = ScelBuilder::new(0x44)
        .pinyin(&[(1, "ni"), (3, "zuo"), (2, "hao")])
        .group(Group::new(&[1, 2], &["你好"]))
        .build();
    let reader = open(bytes);
    assert_eq!(reader.pinyin_table().get(2), None);

    let scan = reader.scan();
    assert!(scan.entries.is_empty());
    assert!(matches!(scan.termination, Termination::MissingPinyin { index: 2, .. }));
}

#[test]
fn missing_sentinel_is_truncated() {
    let bytes = ScelBuilder::new(0x44).pinyin(&[(1, "ni")]).build();
    assert!(matches!(
        ScelReader::from_bytes(bytes, ReadOptions::default()),
        Err(ScelError::Truncated { .. })
    ));
}

#[test]
fn boundary_mode_reads_up_to_records_offset() {
    // "ni" (8 bytes) + "hao" (10 bytes) + a filler entry ending exactly at
    // the records offset; no "zuo" anywhere.
    let filler = "a".repeat((0x2628 - 0x1544 - 18 - 4) / 2);
    let bytes = ScelBuilder::new(0x44)
        .pinyin(&[(1, "ni"), (2, "hao"), (500, filler.as_str())])
        .group(Group::new(&[1, 2], &["你好"]))
        .build();

    let boundary = ReadOptions { pinyin_end: PinyinTableEnd::Boundary };
    let reader = ScelReader::from_bytes(bytes.clone(), boundary).expect("boundary mode");
    assert_eq!(reader.pinyin_table().len(), 3);
    assert_eq!(reader.scan().entries, vec![pair("ni hao", "你好")]);

    // without the sentinel the default mode runs into the record table
    assert!(ScelReader::from_bytes(bytes, ReadOptions::default()).is_err());
}

#[test]
fn odd_index_byte_length_rounds_down() {
    // 3 bytes declared: one index is read and the spare byte is left alone,
    // so the word length follows the single index directly.
    let bytes = ScelBuilder::ni_hao()
        .group(Group::new(&[1], &["你"]).index_byte_len(3))
        .group(Group::new(&[1, 2], &["你好"]))
        .build();
    let scan = open(bytes).scan();
    assert_eq!(scan.entries, vec![pair("ni", "你"), pair("ni hao", "你好")]);
    assert_eq!(scan.termination, Termination::EndOfFile);
}

#[test]
fn boundary_mode_rejects_entry_crossing_records_offset() {
    let filler = "a".repeat((0x2628 - 0x1544 - 18 - 4) / 2);
    let mut bytes = ScelBuilder::new(0x44)
        .pinyin(&[(1, "ni"), (2, "hao"), (500, filler.as_str())])
        .group(Group::new(&[1, 2], &["你好"]))
        .build();
    // stretch the filler by two code units so it reaches into the records
    let entry = 0x1544 + 18;
    let stretched = (filler.len() * 2 + 4) as u16;
    bytes[entry + 2..entry + 4].copy_from_slice(&stretched.to_le_bytes());

    let boundary = ReadOptions { pinyin_end: PinyinTableEnd::Boundary };
    match ScelReader::from_bytes(bytes, boundary) {
        Err(ScelError::Truncated { offset, .. }) => assert_eq!(offset, entry as u64),
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn metadata_block_is_decoded() {
    let bytes = ScelBuilder::ni_hao()
        .title("城市信息大全")
        .category("城市信息")
        .group(Group::new(&[1, 2], &["你好"]))
        .build();
    let reader = open(bytes);
    assert_eq!(reader.metadata.title, "城市信息大全");
    assert_eq!(reader.metadata.category, "城市信息");
    assert_eq!(reader.metadata.description, "");
}

#[test]
fn surrogate_pairs_survive_decoding() {
    let bytes = ScelBuilder::ni_hao()
        .group(Group::new(&[1], &["𠀀"]))
        .build();
    let scan = open(bytes).scan();
    assert_eq!(scan.entries, vec![pair("ni", "𠀀")]);
    assert_eq!(utf16(&scan.entries[0].word), utf16("𠀀"));
}
