mod assembly;
mod golden;
mod mapping;
mod samples;
mod writer;
