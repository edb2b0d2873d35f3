//! Property-based tests for set differencing and document serialization

mod document_order;
