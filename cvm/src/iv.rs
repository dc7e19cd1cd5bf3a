use crate::LookupTable;

/// Initialization vector shared by every sector of a run
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct XorIv(pub [u8; 8]);

impl std::fmt::Debug for XorIv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "XorIv({})", hex::encode(self.0))
    }
}

impl From<[u8; 8]> for XorIv {
    fn from(value: [u8; 8]) -> Self {
        Self(value)
    }
}

impl XorIv {
    /// Derives the IV from a product code.
    ///
    /// With `length` of `None` the identifier is treated as null terminated: it
    /// ends at the first NUL byte or at the end of the slice.
    pub fn derive(
        identifier: &[u8],
        length: Option<usize>,
        table: &LookupTable,
    ) -> Result<Self, super::Error> {
        let identifier = match length {
            Some(length) => identifier
                .get(..length)
                .ok_or(super::Error::IdentifierLength {
                    length,
                    available: identifier.len(),
                })?,
            None => identifier
                .split(|&b| b == 0)
                .next()
                .unwrap_or(identifier),
        };

        let mut iv = [0u8; 8];
        for (i, &b) in identifier.iter().enumerate() {
            let word = table[(b ^ i as u8) as usize];
            let slot = i % 8;
            iv[slot] ^= (word >> 8) as u8;
            iv[(slot + 1) % 8] = iv[(slot + 1) % 8].wrapping_add(word as u8);
        }
        Ok(Self(iv))
    }
}
