// paths.rs - Allele path reconstruction over an existing Sequence table

use crate::allele::sequence_table::SequenceIdMap;
use crate::core::segment::split_tile;
use crate::data::{FastjReader, TileRecord};
use crate::error::{Result, TileGraphError};
use crate::hashers::SequenceDigest;
use crate::output::stage::OutputStage;
use crate::output::tables::sql_bool;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// One sample's call set
#[derive(Debug, Clone)]
pub struct CallSet {
    pub id: u64,
    pub name: String,
    pub sample_id: String,
}

/// One haplotype copy of one sample
#[derive(Debug, Clone)]
pub struct Allele {
    pub id: u64,
    pub variantset_id: i64,
    pub name: String,
}

/// Association of an allele with its sample's call set
#[derive(Debug, Clone)]
pub struct AlleleCall {
    pub allele_id: u64,
    pub callset_id: u64,
    pub ploidy: u32,
}

/// One step of a haplotype's ordered walk over the sequence graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllelePathItem {
    pub allele_id: u64,
    pub index: u64,
    pub sequence_id: u64,
    pub start: i64,
    pub length: i64,
    pub strand_forward: bool,
}

/// Reconstructs per-allele walks by replaying tile streams against a
/// previously emitted Sequence table.
///
/// Consecutive tiles share their boundary anchors, so only the very first
/// anchor of a walk is emitted explicitly; every subsequent tile contributes
/// its body and trailing anchor.
#[derive(Debug)]
pub struct AlleleWalks {
    variantset_id: i64,
    next_allele_id: u64,
    next_callset_id: u64,
    callsets: Vec<CallSet>,
    callset_ids: HashMap<String, u64>,
    alleles: Vec<Allele>,
    allele_slots: HashMap<String, usize>,
    calls: Vec<AlleleCall>,
    paths: Vec<Vec<AllelePathItem>>,
}

impl AlleleWalks {
    pub fn new(start_allele_id: u64, start_callset_id: u64, variantset_id: i64) -> Self {
        Self {
            variantset_id,
            next_allele_id: start_allele_id,
            next_callset_id: start_callset_id,
            callsets: Vec::new(),
            callset_ids: HashMap::new(),
            alleles: Vec::new(),
            allele_slots: HashMap::new(),
            calls: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Register a sample, assigning the next call-set id on first sight
    pub fn register_sample(&mut self, name: &str) -> u64 {
        if let Some(id) = self.callset_ids.get(name) {
            return *id;
        }
        let id = self.next_callset_id;
        self.next_callset_id += 1;
        self.callsets.push(CallSet {
            id,
            name: name.to_string(),
            sample_id: name.to_string(),
        });
        self.callset_ids.insert(name.to_string(), id);
        id
    }

    /// Replay every record of one sample's FastJ file
    pub fn replay_file(
        &mut self,
        sample: &str,
        path: impl AsRef<Path>,
        map: &SequenceIdMap,
        digest: &dyn SequenceDigest,
    ) -> Result<u64> {
        self.register_sample(sample);
        let mut count = 0;
        for record in FastjReader::from_path(path)? {
            self.replay_record(sample, record?, map, digest)?;
            count += 1;
        }
        Ok(count)
    }

    /// Replay a single tile record onto its allele's walk
    pub fn replay_record(
        &mut self,
        sample: &str,
        record: TileRecord,
        map: &SequenceIdMap,
        digest: &dyn SequenceDigest,
    ) -> Result<()> {
        let context = record.context();

        let computed = digest.hex_digest(record.sequence.as_bytes());
        if computed != record.declared_hash {
            return Err(TileGraphError::HashMismatch {
                context,
                declared: record.declared_hash,
                computed,
            });
        }

        let parts = split_tile(&record.sequence, &context)?;

        let leading_id = lookup(map, digest, parts.leading, "anchor", &context)?;
        let body_seq_id = lookup(map, digest, parts.body, "body", &context)?;
        let trailing_id = lookup(map, digest, parts.trailing, "anchor", &context)?;

        let callset_id = self.register_sample(sample);
        let slot = self.allele_slot(sample, record.allele, callset_id);
        let allele_id = self.alleles[slot].id;
        let path = &mut self.paths[slot];

        // The leading anchor is shared with the previous tile; only the
        // walk's very first anchor is recorded
        if path.is_empty() {
            path.push(walk_item(allele_id, 0, leading_id));
        }
        let index = path.len() as u64;
        path.push(walk_item(allele_id, index, body_seq_id));
        path.push(walk_item(allele_id, index + 1, trailing_id));

        Ok(())
    }

    fn allele_slot(&mut self, sample: &str, allele: u64, callset_id: u64) -> usize {
        let key = format!("{}:{}", sample, allele);
        if let Some(slot) = self.allele_slots.get(&key) {
            return *slot;
        }
        let id = self.next_allele_id;
        self.next_allele_id += 1;
        let slot = self.alleles.len();
        self.alleles.push(Allele {
            id,
            variantset_id: self.variantset_id,
            name: key.clone(),
        });
        self.calls.push(AlleleCall {
            allele_id: id,
            callset_id,
            ploidy: 1,
        });
        self.paths.push(Vec::new());
        self.allele_slots.insert(key, slot);
        slot
    }

    pub fn callsets(&self) -> &[CallSet] {
        &self.callsets
    }

    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }

    pub fn calls(&self) -> &[AlleleCall] {
        &self.calls
    }

    /// Walks in ascending allele-id order, each an ordered item list
    pub fn walks(&self) -> impl Iterator<Item = (&Allele, &[AllelePathItem])> {
        self.alleles
            .iter()
            .zip(self.paths.iter().map(|p| p.as_slice()))
    }

    pub fn num_samples(&self) -> usize {
        self.callsets.len()
    }

    pub fn num_alleles(&self) -> usize {
        self.alleles.len()
    }

    pub fn num_path_items(&self) -> usize {
        self.paths.iter().map(|p| p.len()).sum()
    }
}

fn walk_item(allele_id: u64, index: u64, sequence_id: u64) -> AllelePathItem {
    AllelePathItem {
        allele_id,
        index,
        sequence_id,
        start: 0,
        length: -1,
        strand_forward: true,
    }
}

fn lookup(
    map: &SequenceIdMap,
    digest: &dyn SequenceDigest,
    subsequence: &str,
    kind: &'static str,
    context: &str,
) -> Result<u64> {
    let hash = digest.hex_digest(subsequence.as_bytes());
    map.get(&hash).ok_or_else(|| TileGraphError::LookupMiss {
        kind,
        hash,
        context: context.to_string(),
    })
}

/// Write the CallSet table: `id,name,sampleId`
pub fn write_callset_table(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    walks: &AlleleWalks,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for cs in walks.callsets() {
        writeln!(writer, "{},{},{}", cs.id, cs.name, cs.sample_id)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the Allele table: `id,variantSetId,name`
pub fn write_allele_table(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    walks: &AlleleWalks,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for allele in walks.alleles() {
        writeln!(writer, "{},{},{}", allele.id, allele.variantset_id, allele.name)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the AlleleCall table: `alleleId,callSetId,ploidy`
pub fn write_allele_call_table(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    walks: &AlleleWalks,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for call in walks.calls() {
        writeln!(writer, "{},{},{}", call.allele_id, call.callset_id, call.ploidy)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the AllelePathItem table:
/// `alleleId,index,sequenceId,start,length,strand`
pub fn write_allele_path_table(
    stage: &mut OutputStage,
    path: impl AsRef<Path>,
    walks: &AlleleWalks,
) -> Result<()> {
    let mut writer = stage.create(path)?;
    for (_, items) in walks.walks() {
        for item in items {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                item.allele_id,
                item.index,
                item.sequence_id,
                item.start,
                item.length,
                sql_bool(item.strand_forward)
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}
