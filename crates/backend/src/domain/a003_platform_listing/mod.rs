//! Размещения управляются транзакционно из сервиса товара (a001_product),
//! поэтому отдельного сервиса у модуля нет.

pub mod repository;
