use crate::{
    BuiltinXorgen, KeyMaterial, LookupTable, MutationVector, Sector, XorIv, Xorgen, XorgenMethods,
    DESCRIPTOR_SECTORS,
};

/// Chooses the xorgen slot and key material for each ciphered sector
pub trait KeySchedule: Send + Sync {
    fn select(&self, iv: &XorIv, sector_index: u8) -> Result<(Xorgen, KeyMaterial), super::Error>;
}

/// Key schedule drawn from a lookup table.
///
/// The key is the two big endian table words at `2 * sector_index`. The family
/// rotates with the sector (xor, add, mixed) and the low bit of the key and the
/// IV picks one of the two routines in it, so reserved slots never come up.
#[derive(Debug, Clone, Copy)]
pub struct TableSchedule {
    table: &'static LookupTable,
}

impl Default for TableSchedule {
    fn default() -> Self {
        Self::new(crate::lookup_table())
    }
}

impl TableSchedule {
    pub fn new(table: &'static LookupTable) -> Self {
        Self { table }
    }
}

impl KeySchedule for TableSchedule {
    fn select(&self, iv: &XorIv, sector_index: u8) -> Result<(Xorgen, KeyMaterial), super::Error> {
        if !DESCRIPTOR_SECTORS.contains(&sector_index) {
            return Err(super::Error::SectorOutOfRange(sector_index));
        }
        let slot = sector_index as usize * 2;
        let [a, b] = self.table[slot].to_be_bytes();
        let [c, d] = self.table[slot + 1].to_be_bytes();
        let key = [a, b, c, d];

        let family = (sector_index - DESCRIPTOR_SECTORS.start()) % 3;
        let member = (iv.0[sector_index as usize % 8] ^ d) & 1;
        let xorgen = Xorgen::from_repr(family * 3 + 1 + member)
            .ok_or(super::Error::SectorOutOfRange(sector_index))?;
        Ok((xorgen, key))
    }
}

/// Ciphers descriptor sectors in place. Applying it twice restores the data, so
/// the same call encodes and decodes.
pub struct SectorCipher {
    pub(crate) iv: XorIv,
    pub(crate) xorgen: Box<dyn XorgenMethods>,
    pub(crate) schedule: Box<dyn KeySchedule>,
}

impl std::fmt::Debug for SectorCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectorCipher")
            .field("iv", &self.iv)
            .finish_non_exhaustive()
    }
}

impl SectorCipher {
    pub fn new(iv: XorIv) -> Self {
        Self::with_methods(iv, BuiltinXorgen, TableSchedule::default())
    }

    pub fn with_methods(
        iv: XorIv,
        xorgen: impl XorgenMethods + 'static,
        schedule: impl KeySchedule + 'static,
    ) -> Self {
        Self {
            iv,
            xorgen: Box::new(xorgen),
            schedule: Box::new(schedule),
        }
    }

    pub fn iv(&self) -> &XorIv {
        &self.iv
    }

    /// Mutation vector applied to `sector_index`
    pub fn mutation_vector(&self, sector_index: u8) -> Result<MutationVector, super::Error> {
        let (xorgen, key) = self.schedule.select(&self.iv, sector_index)?;
        tracing::debug!(sector = sector_index, %xorgen, key = %hex::encode(key), "cipher sector");
        self.xorgen.generate(xorgen, &self.iv, &key)
    }

    pub fn cipher_sector(&self, data: &mut Sector, sector_index: u8) -> Result<(), super::Error> {
        let vector = self.mutation_vector(sector_index)?;
        for (byte, m) in data.iter_mut().zip(vector.iter().cycle()) {
            *byte ^= m;
        }
        Ok(())
    }
}
