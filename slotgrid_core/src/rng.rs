use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

// Provably-fair draws: HMAC-SHA256(server_seed, "client_seed:nonce[:frame]")
// expanded into floats in [0,1). Publishing sha256(server_seed) up front lets
// a player check every round once the seed is revealed.

pub type HmacSha256 = Hmac<Sha256>;

pub fn derive_hash(input: &[u8]) -> [u8; 32] {
    Sha256::digest(input).into()
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    hex::encode(derive_hash(input))
}

pub fn derive_floats(hmac_bytes: &[u8], count: usize) -> Vec<f64> {
    // Successive 4-byte big-endian chunks mapped to [0,1)
    let mut out = Vec::with_capacity(count);
    let mut buffer = hmac_bytes.to_vec();
    let mut i = 0usize;
    while out.len() < count {
        if i + 4 > buffer.len() {
            // extend deterministically by hashing the previous buffer
            buffer = derive_hash(&buffer).to_vec();
            i = 0;
            continue;
        }
        let v = u32::from_be_bytes([buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]]);
        out.push(v as f64 / (u32::MAX as f64 + 1.0));
        i += 4;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvablyFairRng {
    pub server_seed: String, // secret
    pub client_seed: String,
    pub nonce: u64,
}

impl ProvablyFairRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    fn mac(&self, msg: &str) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes())
            .expect("HMAC accepts keys of any size");
        mac.update(msg.as_bytes());
        mac.finalize().into_bytes().into()
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        self.mac(&format!("{}:{}", self.client_seed, self.nonce))
    }

    /// Bytes for one animation frame of this round, independent of the result.
    pub fn frame_bytes(&self, frame: u32) -> [u8; 32] {
        self.mac(&format!("{}:{}:{}", self.client_seed, self.nonce, frame))
    }

    pub fn next_floats(&self, count: usize) -> Vec<f64> {
        derive_floats(&self.hmac_bytes(), count)
    }

    pub fn frame_floats(&self, frame: u32, count: usize) -> Vec<f64> {
        derive_floats(&self.frame_bytes(frame), count)
    }
}
