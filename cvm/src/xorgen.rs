use crate::XorIv;

/// Per-sector key material fed to a xorgen routine
pub type KeyMaterial = [u8; 4];

/// Output of a xorgen routine, combined with sector data
pub type MutationVector = [u8; 8];

#[repr(u8)]
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Debug,
    strum::Display,
    strum::FromRepr,
    strum::EnumIter,
)]
/// Slots of the xorgen dispatch table
pub enum Xorgen {
    Xorgen0, // reserved, never selected
    Xorgen1,
    Xorgen2,
    Xorgen3, // reserved, never selected
    Xorgen4,
    Xorgen5,
    Xorgen6, // reserved, never selected
    Xorgen7,
    Xorgen8,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, strum::Display)]
pub enum Family {
    Reserved,
    /// key bytes are combined with xor only
    Xor,
    /// key bytes are combined with wrapping addition only
    Add,
    /// both xor and addition
    Mixed,
}

// strum shouldn't need to be installed by users
impl Xorgen {
    pub fn iter() -> XorgenIter {
        <Xorgen as strum::IntoEnumIterator>::iter()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn family(self) -> Family {
        match self {
            Xorgen::Xorgen0 | Xorgen::Xorgen3 | Xorgen::Xorgen6 => Family::Reserved,
            Xorgen::Xorgen1 | Xorgen::Xorgen2 => Family::Xor,
            Xorgen::Xorgen4 | Xorgen::Xorgen5 => Family::Add,
            Xorgen::Xorgen7 | Xorgen::Xorgen8 => Family::Mixed,
        }
    }

    /// Runs the built-in routine for this slot
    ///
    /// Every routine moves the eight IV bytes to new positions and mixes four of
    /// them with one key byte each. Reserved slots have no routine.
    pub fn generate(self, iv: &XorIv, key: &KeyMaterial) -> Result<MutationVector, super::Error> {
        let v = &iv.0;
        let k = key;
        Ok(match self {
            Xorgen::Xorgen1 => [
                v[2] ^ k[1],
                v[7],
                v[5],
                v[3] ^ k[2],
                v[0] ^ k[0],
                v[6],
                v[4],
                v[1] ^ k[3],
            ],
            Xorgen::Xorgen2 => [
                v[1],
                v[7] ^ k[2],
                v[6],
                v[2] ^ k[1],
                v[5] ^ k[3],
                v[3],
                v[0] ^ k[0],
                v[4],
            ],
            Xorgen::Xorgen4 => [
                v[7],
                v[0].wrapping_add(k[3]),
                v[2].wrapping_add(k[0]),
                v[6].wrapping_add(k[1]),
                v[4],
                v[3],
                v[5],
                v[1].wrapping_add(k[2]),
            ],
            Xorgen::Xorgen5 => [
                v[2],
                v[3].wrapping_add(k[2]),
                v[6],
                v[7].wrapping_add(k[0]),
                v[0],
                v[1].wrapping_add(k[1]),
                v[4],
                v[5].wrapping_add(k[3]),
            ],
            Xorgen::Xorgen7 => [
                v[7],
                v[4] ^ k[3],
                v[3],
                v[1].wrapping_add(k[2]),
                v[0],
                v[2],
                v[5].wrapping_add(k[1]),
                v[6] ^ k[0],
            ],
            Xorgen::Xorgen8 => [
                v[3],
                v[0] ^ k[1],
                v[6],
                v[4].wrapping_add(k[0]),
                v[2] ^ k[3],
                v[7],
                v[1],
                v[5].wrapping_add(k[2]),
            ],
            reserved => return Err(super::Error::ReservedXorgen(reserved)),
        })
    }
}

/// Source of the xorgen routines used by [`crate::SectorCipher`]
pub trait XorgenMethods: Send + Sync {
    fn generate(
        &self,
        xorgen: Xorgen,
        iv: &XorIv,
        key: &KeyMaterial,
    ) -> Result<MutationVector, super::Error>;
}

/// Routines from [`Xorgen::generate`]
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinXorgen;

impl XorgenMethods for BuiltinXorgen {
    fn generate(
        &self,
        xorgen: Xorgen,
        iv: &XorIv,
        key: &KeyMaterial,
    ) -> Result<MutationVector, super::Error> {
        xorgen.generate(iv, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_shape() {
        let slots: Vec<u8> = Xorgen::iter().map(Xorgen::index).collect();
        assert_eq!(slots, (0..9).collect::<Vec<u8>>());
        for i in 0..9 {
            assert_eq!(Xorgen::from_repr(i).map(Xorgen::index), Some(i));
        }
        assert_eq!(Xorgen::from_repr(9), None);
    }

    #[test]
    fn test_reserved() {
        let iv = XorIv::default();
        for xorgen in Xorgen::iter() {
            let reserved = xorgen.family() == Family::Reserved;
            assert_eq!(reserved, xorgen.index() % 3 == 0);
            assert_eq!(
                reserved,
                matches!(
                    xorgen.generate(&iv, &[0; 4]),
                    Err(crate::Error::ReservedXorgen(x)) if x == xorgen
                )
            );
        }
    }

    #[test]
    fn test_zero_key_is_permutation() {
        let iv = XorIv([1, 2, 3, 4, 5, 6, 7, 8]);
        for xorgen in Xorgen::iter().filter(|x| x.family() != Family::Reserved) {
            let mut out = xorgen.generate(&iv, &[0; 4]).unwrap();
            out.sort();
            assert_eq!(out, iv.0, "{xorgen}");
        }
    }

    #[test]
    fn test_add_family_carries() {
        let iv = XorIv([0xFF; 8]);
        let out = Xorgen::Xorgen4.generate(&iv, &[1, 2, 3, 4]).unwrap();
        assert_eq!(out, [0xFF, 0x03, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0x02]);
    }
}
