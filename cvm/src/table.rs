/// Number of entries in the xor lookup table
pub const LOOKUP_TABLE_LEN: usize = 256;

/// 16-bit constants the IV and the per-sector key material are drawn from
pub type LookupTable = [u16; LOOKUP_TABLE_LEN];

/// Default table, indexed by byte value. Entries hold an ASCII-range high byte.
static XOR_LOOKUP_TABLE: LookupTable = [
    0x4D77, 0x4FAC, 0x5314, 0x46C0, 0x65DE, 0x5F18, 0x58F2, 0x4F2F,
    0x402C, 0x6242, 0x5828, 0x534D, 0x4D41, 0x570C, 0x5C94, 0x4AFA,
    0x5EFD, 0x5055, 0x4A17, 0x4C17, 0x4240, 0x4BFC, 0x5392, 0x5182,
    0x61EA, 0x62E3, 0x48E3, 0x411C, 0x43DB, 0x64E9, 0x67EC, 0x4CC5,
    0x58F3, 0x60EE, 0x418B, 0x635E, 0x4812, 0x50D1, 0x47A2, 0x44C5,
    0x6218, 0x5274, 0x570F, 0x48DB, 0x40E5, 0x58B6, 0x62B4, 0x4780,
    0x5159, 0x4176, 0x416F, 0x6194, 0x6554, 0x5496, 0x6222, 0x46F8,
    0x44B6, 0x4BF5, 0x4EAB, 0x5E8A, 0x465E, 0x4473, 0x66EC, 0x512B,
    0x622E, 0x49EF, 0x48C3, 0x67BB, 0x6205, 0x504B, 0x5512, 0x481B,
    0x5DC3, 0x5366, 0x5EB7, 0x5529, 0x5B48, 0x491F, 0x5193, 0x44C6,
    0x4C74, 0x5158, 0x6787, 0x4ED2, 0x4027, 0x65F0, 0x6171, 0x4B2D,
    0x5741, 0x4BC7, 0x4533, 0x53B8, 0x48A2, 0x45BC, 0x5CAB, 0x5651,
    0x4D2A, 0x62B1, 0x47BB, 0x5CD9, 0x55B9, 0x4985, 0x5C41, 0x5D30,
    0x582F, 0x6417, 0x441F, 0x5136, 0x566C, 0x6149, 0x5833, 0x60CC,
    0x4F50, 0x4AFA, 0x5E5F, 0x62D0, 0x42BB, 0x560A, 0x6781, 0x6023,
    0x418D, 0x6458, 0x4C7B, 0x58A5, 0x43A6, 0x5EC6, 0x632B, 0x5B37,
    0x50E6, 0x4A33, 0x4673, 0x49B7, 0x482D, 0x4A7F, 0x5331, 0x4A06,
    0x4B5B, 0x5D89, 0x5347, 0x6604, 0x4850, 0x5233, 0x6793, 0x4D91,
    0x51EC, 0x535C, 0x5DF6, 0x4F8E, 0x4D0F, 0x46E3, 0x4651, 0x5CD9,
    0x4499, 0x5DAA, 0x5B82, 0x4C53, 0x4E6A, 0x5F90, 0x526B, 0x67DC,
    0x4B62, 0x5B75, 0x54EA, 0x5655, 0x6361, 0x4338, 0x5AE1, 0x579C,
    0x5D47, 0x45BB, 0x5A2E, 0x6392, 0x63F4, 0x4BDD, 0x65B3, 0x5217,
    0x6448, 0x5C7D, 0x5C4E, 0x640B, 0x4023, 0x477D, 0x55E1, 0x514F,
    0x4F65, 0x66BC, 0x594A, 0x59C1, 0x41ED, 0x671A, 0x616B, 0x6442,
    0x659D, 0x6476, 0x5322, 0x52B2, 0x4554, 0x4BB2, 0x6051, 0x53F2,
    0x58F2, 0x46AD, 0x41D6, 0x60E0, 0x4E57, 0x5446, 0x4C92, 0x475D,
    0x4F63, 0x5C5F, 0x6266, 0x4949, 0x43F6, 0x58D7, 0x4430, 0x5684,
    0x52F0, 0x5E8E, 0x40D2, 0x56EF, 0x5331, 0x5863, 0x672A, 0x5168,
    0x4099, 0x4D38, 0x521A, 0x57D0, 0x5808, 0x4CEC, 0x4F80, 0x6007,
    0x435E, 0x475E, 0x5F3E, 0x44ED, 0x617B, 0x4C70, 0x6332, 0x4B63,
    0x4A3F, 0x6501, 0x613E, 0x5D47, 0x558A, 0x49F1, 0x4240, 0x4B7A,
    0x443C, 0x671F, 0x4F1A, 0x53DC, 0x5635, 0x496D, 0x4EAA, 0x5E4E,
];

/// The process wide xor lookup table
pub fn lookup_table() -> &'static LookupTable {
    &XOR_LOOKUP_TABLE
}
