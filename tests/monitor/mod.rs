mod ingestion;
mod maintenance;
