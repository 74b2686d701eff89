pub mod ctl;
pub mod error;
pub mod flow;
pub mod net;
pub mod replay;
pub mod route;
pub mod topo;

#[cfg(test)]
mod test;
