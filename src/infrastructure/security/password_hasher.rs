//! Iterated, salted SHA-256 password hasher
//!
//! digest_0 = SHA256(salt || password)
//! digest_n = SHA256(salt || digest_{n-1})
//!
//! 哈希在 `spawn_blocking` 线程池中计算，不占用异步运行时线程

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::application::ports::{HashError, PasswordHasherPort};
use crate::domain::user::PasswordHash;

const SALT_LEN: usize = 16;

/// SHA-256 密码哈希器
pub struct Sha256PasswordHasher {
    iterations: u32,
    dummy: PasswordHash,
}

impl Sha256PasswordHasher {
    pub fn new(iterations: u32) -> Result<Self, HashError> {
        if iterations == 0 {
            return Err(HashError::Failed("iterations must be positive".to_string()));
        }

        let salt = random_salt();
        let digest = derive(&salt, Uuid::new_v4().as_bytes(), iterations);
        let dummy = PasswordHash::new(iterations, salt, digest.to_vec())
            .map_err(|e| HashError::Failed(e.to_string()))?;

        Ok(Self { iterations, dummy })
    }
}

/// 16 字节随机盐
///
/// 单个 UUID v4 只有 122 位随机位，这里取两个（共 244 位）经 SHA-256 压缩后截取
fn random_salt() -> Vec<u8> {
    let seed = Sha256::new()
        .chain_update(Uuid::new_v4().as_bytes())
        .chain_update(Uuid::new_v4().as_bytes())
        .finalize();
    seed[..SALT_LEN].to_vec()
}

fn derive(salt: &[u8], password: &[u8], iterations: u32) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::new().chain_update(salt).chain_update(password).finalize());

    for _ in 1..iterations {
        let next = Sha256::new().chain_update(salt).chain_update(out).finalize();
        out.copy_from_slice(&next);
    }

    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// 在阻塞线程池中运行 CPU 密集型闭包
async fn run_blocking<T, F>(work: F) -> Result<T, HashError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| HashError::Failed(format!("hashing task failed: {}", e)))
}

#[async_trait]
impl PasswordHasherPort for Sha256PasswordHasher {
    async fn hash(&self, password: &SecretString) -> Result<PasswordHash, HashError> {
        let password = SecretString::from(password.expose_secret().to_string());
        let iterations = self.iterations;

        run_blocking(move || {
            let salt = random_salt();
            let digest = derive(&salt, password.expose_secret().as_bytes(), iterations);
            PasswordHash::new(iterations, salt, digest.to_vec())
                .map_err(|e| HashError::Failed(e.to_string()))
        })
        .await?
    }

    async fn verify(
        &self,
        password: &SecretString,
        hash: &PasswordHash,
    ) -> Result<bool, HashError> {
        let password = SecretString::from(password.expose_secret().to_string());
        let hash = hash.clone();

        run_blocking(move || {
            let digest = derive(
                hash.salt(),
                password.expose_secret().as_bytes(),
                hash.iterations(),
            );
            constant_time_eq(&digest, hash.digest())
        })
        .await
    }

    fn dummy_hash(&self) -> &PasswordHash {
        &self.dummy
    }
}
