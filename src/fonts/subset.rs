//! TrueType glyph subsetting for embedding.
//!
//! Embedded fonts are written as CIDFontType2 with an identity CID-to-GID
//! map, so glyph IDs must not change. Unused glyphs stay in `loca` as empty
//! entries and only the outlines of used glyphs (plus the glyphs their
//! composites reference) are copied. Only the tables a PDF consumer reads
//! from a TrueType font program are kept (ISO 32000-1, 9.9).
//!
//! Subset fonts are renamed `ABCDEF+Name`, the tag derived from the glyph
//! set so identical input gives identical output.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use ttf_parser::{RawFace, Tag};

/// Tables copied into a subset, in tag order.
const KEPT_TABLES: [&[u8; 4]; 9] = [
    b"cvt ", b"fpgm", b"glyf", b"head", b"hhea", b"hmtx", b"loca", b"maxp", b"prep",
];

const HEAD_MIN_LEN: usize = 54;
const HEAD_CHECKSUM_ADJUSTMENT: usize = 8;
const HEAD_INDEX_TO_LOC_FORMAT: usize = 50;
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

// Composite glyph component flags
const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;

/// Why a font could not be subset.
#[derive(Debug, thiserror::Error)]
pub enum SubsetError {
    /// Not a font file ttf-parser can read
    #[error("failed to parse font: {0}")]
    Parse(String),

    /// Required table absent (CFF-flavoured fonts have no `glyf`)
    #[error("missing {0} table")]
    MissingTable(&'static str),

    /// Table present but inconsistent
    #[error("malformed {0} table")]
    Malformed(&'static str),
}

/// Result type for subsetting.
pub type SubsetResult<T> = Result<T, SubsetError>;

/// Build a font program holding only `glyphs` (and `.notdef`).
pub fn subset_font(data: &[u8], glyphs: &BTreeSet<u16>) -> SubsetResult<Vec<u8>> {
    let face = RawFace::parse(data, 0).map_err(|e| SubsetError::Parse(e.to_string()))?;
    let table = |tag: &[u8; 4]| face.table(Tag::from_bytes(tag));

    let head = table(b"head").ok_or(SubsetError::MissingTable("head"))?;
    let maxp = table(b"maxp").ok_or(SubsetError::MissingTable("maxp"))?;
    let loca = table(b"loca").ok_or(SubsetError::MissingTable("loca"))?;
    let glyf = table(b"glyf").ok_or(SubsetError::MissingTable("glyf"))?;
    if head.len() < HEAD_MIN_LEN {
        return Err(SubsetError::Malformed("head"));
    }

    let num_glyphs = read_u16(maxp, 4).ok_or(SubsetError::Malformed("maxp"))?;
    let long_offsets = read_u16(head, HEAD_INDEX_TO_LOC_FORMAT) == Some(1);
    let offsets = glyph_offsets(loca, glyf.len(), num_glyphs, long_offsets)?;

    let keep = glyph_closure(glyf, &offsets, glyphs);
    let (mut new_glyf, mut new_loca) = rebuild_glyf(glyf, &offsets, &keep);

    // Offsets are always written long; the checksum adjustment is recomputed.
    let mut new_head = head.to_vec();
    new_head[HEAD_CHECKSUM_ADJUSTMENT..HEAD_CHECKSUM_ADJUSTMENT + 4].fill(0);
    new_head[HEAD_INDEX_TO_LOC_FORMAT..HEAD_INDEX_TO_LOC_FORMAT + 2]
        .copy_from_slice(&1u16.to_be_bytes());

    let mut tables: Vec<(&[u8; 4], Vec<u8>)> = Vec::with_capacity(KEPT_TABLES.len());
    for tag in KEPT_TABLES {
        let data = match tag {
            b"glyf" => std::mem::take(&mut new_glyf),
            b"loca" => std::mem::take(&mut new_loca),
            b"head" => std::mem::take(&mut new_head),
            _ => match table(tag) {
                Some(data) => data.to_vec(),
                None => continue,
            },
        };
        tables.push((tag, data));
    }

    let program = write_font(&tables);
    log::debug!(
        "Subset font to {} of {} glyphs ({} -> {} bytes)",
        keep.len(),
        num_glyphs,
        data.len(),
        program.len()
    );
    Ok(program)
}

/// Six-letter subset tag for a glyph set.
pub fn subset_tag(glyphs: &BTreeSet<u16>) -> String {
    let mut hasher = DefaultHasher::new();
    for glyph in glyphs {
        glyph.hash(&mut hasher);
    }

    let mut h = hasher.finish();
    (0..6)
        .map(|_| {
            let ch = (b'A' + (h % 26) as u8) as char;
            h /= 26;
            ch
        })
        .collect()
}

fn read_u16(data: &[u8], pos: usize) -> Option<u16> {
    let bytes = data.get(pos..pos + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], pos: usize) -> Option<u32> {
    let bytes = data.get(pos..pos + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// `num_glyphs + 1` byte offsets into `glyf`.
fn glyph_offsets(
    loca: &[u8],
    glyf_len: usize,
    num_glyphs: u16,
    long_offsets: bool,
) -> SubsetResult<Vec<usize>> {
    let offsets = (0..=num_glyphs as usize)
        .map(|i| {
            if long_offsets {
                read_u32(loca, i * 4).map(|o| o as usize)
            } else {
                read_u16(loca, i * 2).map(|o| o as usize * 2)
            }
        })
        .collect::<Option<Vec<usize>>>()
        .ok_or(SubsetError::Malformed("loca"))?;

    let ordered = offsets.windows(2).all(|w| w[0] <= w[1]);
    if !ordered || offsets.last().is_some_and(|&end| end > glyf_len) {
        return Err(SubsetError::Malformed("loca"));
    }
    Ok(offsets)
}

/// Used glyphs, `.notdef`, and every glyph reachable through composites.
fn glyph_closure(glyf: &[u8], offsets: &[usize], used: &BTreeSet<u16>) -> BTreeSet<u16> {
    let num_glyphs = offsets.len() - 1;
    let mut keep = BTreeSet::new();
    let mut pending: Vec<u16> = std::iter::once(0).chain(used.iter().copied()).collect();

    while let Some(gid) = pending.pop() {
        let index = gid as usize;
        if index >= num_glyphs || !keep.insert(gid) {
            continue;
        }
        pending.extend(component_glyphs(&glyf[offsets[index]..offsets[index + 1]]));
    }
    keep
}

/// Glyph IDs referenced by a composite glyph; empty for simple glyphs.
fn component_glyphs(glyph: &[u8]) -> Vec<u16> {
    let mut components = Vec::new();
    let is_composite = read_u16(glyph, 0).is_some_and(|n| (n as i16) < 0);
    if !is_composite {
        return components;
    }

    let mut pos = 10;
    while let (Some(flags), Some(gid)) = (read_u16(glyph, pos), read_u16(glyph, pos + 2)) {
        components.push(gid);
        pos += 4;
        pos += if flags & ARG_1_AND_2_ARE_WORDS != 0 { 4 } else { 2 };
        if flags & WE_HAVE_A_SCALE != 0 {
            pos += 2;
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            pos += 4;
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            pos += 8;
        }
        if flags & MORE_COMPONENTS == 0 {
            break;
        }
    }
    components
}

/// New `glyf` and long-format `loca` with unused glyphs emptied.
fn rebuild_glyf(glyf: &[u8], offsets: &[usize], keep: &BTreeSet<u16>) -> (Vec<u8>, Vec<u8>) {
    let mut new_glyf = Vec::new();
    let mut new_loca = Vec::with_capacity(offsets.len() * 4);

    for gid in 0..offsets.len() - 1 {
        new_loca.extend_from_slice(&(new_glyf.len() as u32).to_be_bytes());
        if keep.contains(&(gid as u16)) {
            new_glyf.extend_from_slice(&glyf[offsets[gid]..offsets[gid + 1]]);
            pad_to_word(&mut new_glyf);
        }
    }
    new_loca.extend_from_slice(&(new_glyf.len() as u32).to_be_bytes());
    (new_glyf, new_loca)
}

fn pad_to_word(data: &mut Vec<u8>) {
    while data.len() % 4 != 0 {
        data.push(0);
    }
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

/// Serialize an sfnt from tag-sorted tables.
fn write_font(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = num_tables * 16 - search_range;

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for value in [num_tables, search_range, entry_selector, range_shift] {
        out.extend_from_slice(&value.to_be_bytes());
    }

    let mut offset = 12 + 16 * tables.len();
    let mut head_offset = None;
    for (tag, data) in tables {
        if *tag == b"head" {
            head_offset = Some(offset);
        }
        out.extend_from_slice(*tag);
        out.extend_from_slice(&checksum(data).to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += data.len().div_ceil(4) * 4;
    }
    for (_, data) in tables {
        out.extend_from_slice(data);
        pad_to_word(&mut out);
    }

    if let Some(pos) = head_offset {
        let adjustment = CHECKSUM_MAGIC.wrapping_sub(checksum(&out));
        out[pos + HEAD_CHECKSUM_ADJUSTMENT..pos + HEAD_CHECKSUM_ADJUSTMENT + 4]
            .copy_from_slice(&adjustment.to_be_bytes());
    }
    out
}
