mod converter;
mod reader;
mod slicer;
mod spans;
