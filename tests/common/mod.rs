//! Synthetic cell dictionary builder shared by the integration tests.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const PINYIN_ENTRIES_OFFSET: usize = 0x1544;

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

pub struct Group {
    pub indices: Vec<u16>,
    pub words: Vec<Vec<u8>>,
    /// Written instead of `indices.len() * 2` when set.
    pub index_byte_len: Option<u16>,
}

impl Group {
    pub fn new(indices: &[u16], words: &[&str]) -> Self {
        Self {
            indices: indices.to_vec(),
            words: words.iter().map(|w| utf16(w)).collect(),
            index_byte_len: None,
        }
    }

    /// A group whose word bytes are written verbatim.
    pub fn raw(indices: &[u16], words: Vec<Vec<u8>>) -> Self {
        Self {
            indices: indices.to_vec(),
            words,
            index_byte_len: None,
        }
    }

    pub fn index_byte_len(mut self, len: u16) -> Self {
        self.index_byte_len = Some(len);
        self
    }
}

pub struct ScelBuilder {
    pub tag: u8,
    pub title: String,
    pub category: String,
    pub pinyin: Vec<(u16, String)>,
    pub groups: Vec<Group>,
}

impl ScelBuilder {
    pub fn new(tag: u8) -> Self {
        Self {
            tag,
            title: String::new(),
            category: String::new(),
            pinyin: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Tag 0x44 with pinyin table `{1: ni, 2: hao, 3: zuo}`.
    pub fn ni_hao() -> Self {
        Self::new(0x44).pinyin(&[(1, "ni"), (2, "hao"), (3, "zuo")])
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn pinyin(mut self, entries: &[(u16, &str)]) -> Self {
        self.pinyin
            .extend(entries.iter().map(|(i, s)| (*i, s.to_string())));
        self
    }

    pub fn group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn records_offset(&self) -> usize {
        match self.tag {
            0x45 => 0x26c4,
            _ => 0x2628,
        }
    }

    /// Bytes of the header, metadata block and pinyin table, zero-padded up to
    /// the records offset.
    pub fn prefix(&self) -> Vec<u8> {
        let mut buf = vec![0u8; PINYIN_ENTRIES_OFFSET];
        buf[4] = self.tag;
        write_field(&mut buf, 0x130, &self.title);
        write_field(&mut buf, 0x338, &self.category);

        for (index, syllable) in &self.pinyin {
            let bytes = utf16(syllable);
            buf.write_u16::<LittleEndian>(*index).unwrap();
            buf.write_u16::<LittleEndian>(bytes.len() as u16).unwrap();
            buf.extend_from_slice(&bytes);
        }
        assert!(buf.len() <= self.records_offset(), "pinyin table overlaps records");
        buf.resize(self.records_offset(), 0);
        buf
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = self.prefix();
        for group in &self.groups {
            buf.write_u16::<LittleEndian>(group.words.len() as u16).unwrap();
            let index_len = group
                .index_byte_len
                .unwrap_or((group.indices.len() * 2) as u16);
            buf.write_u16::<LittleEndian>(index_len).unwrap();
            for index in &group.indices {
                buf.write_u16::<LittleEndian>(*index).unwrap();
            }
            for (n, word) in group.words.iter().enumerate() {
                buf.write_u16::<LittleEndian>(word.len() as u16).unwrap();
                buf.extend_from_slice(word);
                // extension block: length, frequency, reserved
                buf.write_u16::<LittleEndian>(10).unwrap();
                buf.write_u16::<LittleEndian>(100 + n as u16).unwrap();
                buf.extend_from_slice(&[0u8; 8]);
            }
        }
        buf
    }
}

fn write_field(buf: &mut [u8], offset: usize, text: &str) {
    let bytes = utf16(text);
    buf[offset..offset + bytes.len()].copy_from_slice(&bytes);
}
