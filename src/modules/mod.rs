//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the DynamoDB and S3 adapters behind the storage capabilities.

pub mod storage;
