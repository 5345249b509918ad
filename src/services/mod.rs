pub mod completion_service;
pub mod generation_service;
pub mod grading_service;
pub mod library_service;
pub mod normalizer;
pub mod pdf_service;
pub mod quiz_parser;
pub mod storage_service;
