mod editor_flow;
mod snapshot_server;
