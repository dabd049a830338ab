//! Traditional PKWARE encryption (ZipCrypto).
//!
//! The original ZIP stream cipher from the PKWARE APPNOTE, still the
//! scheme most password-protected archives in the wild use. Three
//! 32-bit keys are derived from the password and advanced with a
//! CRC-32 step for every plaintext byte. Each encrypted entry is
//! preceded by a 12-byte header whose final byte doubles as a cheap
//! password check.
//!
//! ZipCrypto is cryptographically weak; this module exists for
//! compatibility with existing archives, not for protecting data.

const CRC32_POLY: u32 = 0xEDB8_8320;

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC32_POLY
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_crc_table();

#[inline]
fn crc32_step(crc: u32, byte: u8) -> u32 {
    CRC_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
}

/// ZipCrypto keystream state.
///
/// Construct with the password, then feed it the 12-byte encryption
/// header before the entry data. The same state machine serves both
/// directions; only which byte (plain or cipher) feeds the key update
/// differs.
pub struct ZipCrypto {
    key0: u32,
    key1: u32,
    key2: u32,
}

impl ZipCrypto {
    pub fn new(password: &[u8]) -> Self {
        let mut cipher = Self {
            key0: 0x1234_5678,
            key1: 0x2345_6789,
            key2: 0x3456_7890,
        };
        for &byte in password {
            cipher.update_keys(byte);
        }
        cipher
    }

    fn update_keys(&mut self, plain: u8) {
        self.key0 = crc32_step(self.key0, plain);
        self.key1 = self
            .key1
            .wrapping_add(self.key0 & 0xFF)
            .wrapping_mul(134_775_813)
            .wrapping_add(1);
        self.key2 = crc32_step(self.key2, (self.key1 >> 24) as u8);
    }

    #[inline]
    fn stream_byte(&self) -> u8 {
        let temp = (self.key2 as u16) | 2;
        (temp.wrapping_mul(temp ^ 1) >> 8) as u8
    }

    pub fn decrypt_byte(&mut self, cipher: u8) -> u8 {
        let plain = cipher ^ self.stream_byte();
        self.update_keys(plain);
        plain
    }

    pub fn encrypt_byte(&mut self, plain: u8) -> u8 {
        let cipher = plain ^ self.stream_byte();
        self.update_keys(plain);
        cipher
    }

    /// Decrypt a buffer in place.
    pub fn decrypt(&mut self, data: &mut [u8]) {
        for byte in data {
            *byte = self.decrypt_byte(*byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_restores_plaintext() {
        let plain = b"the quick brown fox jumps over the lazy dog";

        let mut enc = ZipCrypto::new(b"153456");
        let cipher: Vec<u8> = plain.iter().map(|&b| enc.encrypt_byte(b)).collect();
        assert_ne!(&cipher[..], &plain[..]);

        let mut dec = ZipCrypto::new(b"153456");
        let mut output = cipher;
        dec.decrypt(&mut output);
        assert_eq!(&output[..], &plain[..]);
    }

    #[test]
    fn wrong_password_garbles_output() {
        let plain = b"sixteen byte msg";

        let mut enc = ZipCrypto::new(b"correct horse");
        let cipher: Vec<u8> = plain.iter().map(|&b| enc.encrypt_byte(b)).collect();

        let mut dec = ZipCrypto::new(b"battery staple");
        let mut output = cipher;
        dec.decrypt(&mut output);
        assert_ne!(&output[..], &plain[..]);
    }

    #[test]
    fn empty_password_is_a_valid_key() {
        let mut enc = ZipCrypto::new(b"");
        let cipher: Vec<u8> = b"data".iter().map(|&b| enc.encrypt_byte(b)).collect();

        let mut dec = ZipCrypto::new(b"");
        let mut output = cipher;
        dec.decrypt(&mut output);
        assert_eq!(&output[..], b"data");
    }
}
