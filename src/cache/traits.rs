use async_trait::async_trait;

/// 缓存查询结果
///
/// 区分「键不存在」与「键存在但取不到值」两种情况，
/// 后者多见于后端连接异常或反序列化失败。
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 对象缓存统一接口
///
/// 所有实现都以字符串为值类型，调用方负责序列化。
/// ttl 单位为秒，0 表示使用后端的默认 TTL。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
