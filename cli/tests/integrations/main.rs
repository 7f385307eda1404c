mod interactive;
mod run;
mod server;
mod vars;
