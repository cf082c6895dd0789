//! 服务注册表
//!
//! 服务与操作在启动时显式声明：服务标识映射到一组带名字的操作
//! 声明（HTTP方法 + 路径模板）。同名操作允许重复声明，查找时
//! 返回声明顺序中的第一个，不按参数形态区分。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 操作使用的HTTP方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 单个操作的声明
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationSpec {
    /// 操作名，命令字的方法段按它匹配
    pub name: String,
    /// HTTP方法
    pub method: HttpMethod,
    /// 路径模板，`{param}` 片段在调用时由查询参数填充
    pub path: String,
}

/// 单个服务的声明
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSpec {
    name: String,
    operations: Vec<OperationSpec>,
}

impl ServiceSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 声明顺序的操作列表
    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }

    /// 首个同名操作
    pub fn first_operation(&self, name: &str) -> Option<&OperationSpec> {
        self.operations.iter().find(|op| op.name == name)
    }
}

/// 服务注册表
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceSpec>,
}

impl ServiceRegistry {
    pub fn builder() -> ServiceRegistryBuilder {
        ServiceRegistryBuilder {
            services: HashMap::new(),
        }
    }

    pub fn get(&self, service: &str) -> Option<&ServiceSpec> {
        self.services.get(service)
    }

    pub fn contains(&self, service: &str) -> bool {
        self.services.contains_key(service)
    }

    /// 已注册的服务数量
    pub fn count(&self) -> usize {
        self.services.len()
    }
}

/// 注册表构造器
pub struct ServiceRegistryBuilder {
    services: HashMap<String, ServiceSpec>,
}

impl ServiceRegistryBuilder {
    /// 声明一个GET操作
    pub fn get(self, service: &str, operation: &str, path: &str) -> Self {
        self.push(service, operation, HttpMethod::Get, path)
    }

    /// 声明一个POST操作
    pub fn post(self, service: &str, operation: &str, path: &str) -> Self {
        self.push(service, operation, HttpMethod::Post, path)
    }

    fn push(mut self, service: &str, operation: &str, method: HttpMethod, path: &str) -> Self {
        let spec = self
            .services
            .entry(service.to_string())
            .or_insert_with(|| ServiceSpec {
                name: service.to_string(),
                operations: Vec::new(),
            });
        spec.operations.push(OperationSpec {
            name: operation.to_string(),
            method,
            path: path.to_string(),
        });
        self
    }

    pub fn build(self) -> ServiceRegistry {
        ServiceRegistry {
            services: self.services,
        }
    }
}
