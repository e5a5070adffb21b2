//! Worked example of the standard: a 100 byte PSDU sent at 36 Mbps with scrambler seed 0x5D.

/// The example PSDU: a MAC data frame carrying 72 bytes of text and its FCS
pub const ANNEX_L_PSDU: [u8; 100] = [
    0x04, 0x02, 0x00, 0x2e, 0x00, 0x60, 0x08, 0xcd, 0x37, 0xa6, 0x00, 0x20,
    0xd6, 0x01, 0x3c, 0xf1, 0x00, 0x60, 0x08, 0xad, 0x3b, 0xaf, 0x00, 0x00,
    0x4a, 0x6f, 0x79, 0x2c, 0x20, 0x62, 0x72, 0x69, 0x67, 0x68, 0x74, 0x20,
    0x73, 0x70, 0x61, 0x72, 0x6b, 0x20, 0x6f, 0x66, 0x20, 0x64, 0x69, 0x76,
    0x69, 0x6e, 0x69, 0x74, 0x79, 0x2c, 0x0a, 0x44, 0x61, 0x75, 0x67, 0x68,
    0x74, 0x65, 0x72, 0x20, 0x6f, 0x66, 0x20, 0x45, 0x6c, 0x79, 0x73, 0x69,
    0x75, 0x6d, 0x2c, 0x0a, 0x46, 0x69, 0x72, 0x65, 0x2d, 0x69, 0x6e, 0x73,
    0x69, 0x72, 0x65, 0x64, 0x20, 0x77, 0x65, 0x20, 0x74, 0x72, 0x65, 0x61,
    0x67, 0x33, 0x21, 0xb6,
];

/// DATA field of the example after scrambling with seed 0x5D and zeroing the tail: SERVICE,
/// PSDU, tail and 42 pad bits (864 bits, 6 symbols)
pub const ANNEX_L_SCRAMBLED: [u8; 108] = [
    0x6c, 0x19, 0x89, 0x8f, 0x68, 0x21, 0xf4, 0xa5, 0x61, 0x4f, 0xd7, 0xae,
    0x24, 0x0c, 0xf3, 0x3a, 0xe4, 0xbc, 0x53, 0x98, 0xc0, 0x1e, 0x35, 0xb3,
    0xe3, 0xf8, 0x25, 0x60, 0xd6, 0x25, 0x35, 0x33, 0xfe, 0xf0, 0x41, 0x2b,
    0x8f, 0x53, 0x1c, 0x83, 0x41, 0xbe, 0x39, 0x28, 0x66, 0x44, 0x66, 0xcd,
    0xf6, 0xa3, 0xd8, 0x0d, 0xd4, 0x81, 0x3b, 0x2f, 0xdf, 0xc3, 0x58, 0xf7,
    0xc6, 0x52, 0xeb, 0x70, 0x8f, 0x9e, 0x6a, 0x90, 0x81, 0xfd, 0x7c, 0xa9,
    0xd1, 0x55, 0x12, 0x04, 0x74, 0xd9, 0xe9, 0x3b, 0xcd, 0x93, 0x8d, 0x7b,
    0x7c, 0x70, 0x02, 0x20, 0x99, 0xa1, 0x7d, 0x8a, 0x27, 0x17, 0x39, 0x15,
    0xa0, 0xec, 0x95, 0x16, 0x91, 0x10, 0x00, 0xdc, 0x7f, 0x0e, 0xf2, 0xc9,
];

/// Frame samples 400..=480: the first DATA symbol, with the SIGNAL window tail added into its
/// first sample and the second symbol's window head into its last
pub const ANNEX_L_FIRST_DATA_SYMBOL: [(f64, f64); 81] = [
    (-0.139, 0.050), (0.004, 0.014), (0.011, -0.100), (-0.097, -0.020), (0.062, 0.081),
    (0.124, 0.139), (0.104, -0.015), (0.173, -0.140), (-0.040, 0.006), (-0.133, 0.009),
    (-0.002, -0.043), (-0.047, 0.092), (-0.109, 0.082), (-0.024, 0.010), (0.096, 0.019),
    (0.019, -0.023), (-0.087, -0.049), (0.002, 0.058), (-0.021, 0.228), (-0.103, 0.023),
    (-0.019, -0.175), (0.018, 0.132), (-0.071, 0.160), (-0.153, -0.062), (-0.107, 0.028),
    (0.055, 0.140), (0.070, 0.103), (-0.056, 0.025), (-0.043, 0.002), (0.016, -0.118),
    (0.026, -0.071), (0.033, 0.177), (0.020, -0.021), (0.035, -0.088), (-0.008, 0.101),
    (-0.035, -0.010), (0.065, 0.030), (0.092, -0.034), (0.032, -0.123), (-0.018, 0.092),
    (0.000, -0.006), (-0.006, -0.056), (-0.019, 0.040), (0.053, -0.131), (0.022, -0.133),
    (0.104, -0.032), (0.163, -0.045), (-0.105, -0.030), (-0.110, -0.069), (-0.008, -0.092),
    (-0.049, -0.043), (0.085, -0.017), (0.090, 0.063), (0.015, 0.153), (0.049, 0.094),
    (0.011, 0.034), (-0.012, 0.012), (-0.015, -0.017), (-0.061, 0.031), (-0.070, -0.040),
    (0.011, -0.109), (0.037, -0.060), (-0.003, -0.178), (-0.007, -0.128), (-0.059, 0.100),
    (0.004, 0.014), (0.011, -0.100), (-0.097, -0.020), (0.062, 0.081), (0.124, 0.139),
    (0.104, -0.015), (0.173, -0.140), (-0.040, 0.006), (-0.133, 0.009), (-0.002, -0.043),
    (-0.047, 0.092), (-0.109, 0.082), (-0.024, 0.010), (0.096, 0.019), (0.019, -0.023),
    (-0.058, 0.016),
];
