mod config_startup;
mod key_flow;
mod rounds;
