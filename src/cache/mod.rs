//! 对象缓存模块
//!
//! 提供统一的 ObjectCache 接口，后端实现通过插件注册表挂载。
//! 内置 moka（进程内）与 redis（跨进程）两种实现。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// 在模块加载时（ctor）把构造函数注册到全局注册表，
/// 运行时按配置的名字选择后端。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $ty:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            <$ty>::new()
                                .map(|cache| {
                                    Box::new(cache) as Box<dyn $crate::cache::ObjectCache>
                                })
                                .map_err($crate::errors::CourseHubError::cache_connection)
                        })
                    }),
                );
            }
        }
    };
}
