use redis::{aio::MultiplexedConnection, Client, Pipeline, Script};
use redis::AsyncCommands;
use std::error::Error;
use std::fmt;

// Small helper to shorten CRUD error mapping
fn crud<E: ToString>(e: E) -> RedisServiceErr {
    RedisServiceErr::CRUDErr(e.to_string())
}

#[derive(Debug)]
pub enum RedisServiceErr {
    ConnectionErr(String),
    CRUDErr(String),
}

impl fmt::Display for RedisServiceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedisServiceErr::ConnectionErr(str) => {
                write!(f, "error while connection to instance: {str}")
            }
            RedisServiceErr::CRUDErr(str) => write!(f, "error while performing CRUD action: {str}"),
        }
    }
}

impl Error for RedisServiceErr {}

/// Thin async wrapper over one Redis client. Owned by whoever builds it at
/// startup and shared through an `Arc`; there is no process-global handle.
pub struct RedisService {
    client: Client,
}

impl RedisService {
    pub fn new(host_url: &str) -> Result<Self, RedisServiceErr> {
        let formatted_url = format!("redis://{}/", host_url);
        let client =
            Client::open(formatted_url).map_err(|e| RedisServiceErr::ConnectionErr(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, RedisServiceErr> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| RedisServiceErr::ConnectionErr(e.to_string()))
    }

    /// Round-trip a PING; used at startup to fail fast on a bad address.
    pub async fn ping(&self) -> Result<(), RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await.map_err(crud)?;
        Ok(())
    }

    pub async fn exists(&self, key: &str) -> Result<bool, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        conn.exists(key).await.map_err(crud)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        conn.get(key).await.map_err(crud)
    }

    pub async fn get_hash_all(&self, key: &str) -> Result<Vec<(String, String)>, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        conn.hgetall(key).await.map_err(crud)
    }

    pub async fn delete_key(&self, key: &str) -> Result<bool, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        let deleted: i32 = conn.del(key).await.map_err(crud)?;
        Ok(deleted > 0)
    }

    pub async fn set_members(&self, key: &str) -> Result<Vec<String>, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        conn.smembers(key).await.map_err(crud)
    }

    pub async fn remove_member(&self, key: &str, member: &str) -> Result<bool, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        let removed: i32 = conn.srem(key, member).await.map_err(crud)?;
        Ok(removed > 0)
    }

    /// Run a pipeline as one MULTI/EXEC transaction.
    pub async fn exec_atomic(&self, mut pipeline: Pipeline) -> Result<(), RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        pipeline.atomic();
        let _: () = pipeline.query_async(&mut conn).await.map_err(crud)?;
        Ok(())
    }

    /// Evaluate a Lua script returning an integer status.
    pub async fn run_script(
        &self,
        script: &Script,
        keys: &[String],
        args: &[String],
    ) -> Result<i64, RedisServiceErr> {
        let mut conn = self.get_connection().await?;
        let mut invocation = script.prepare_invoke();
        for key in keys {
            invocation.key(key);
        }
        for arg in args {
            invocation.arg(arg);
        }
        invocation.invoke_async(&mut conn).await.map_err(crud)
    }
}
