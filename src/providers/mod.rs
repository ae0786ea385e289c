pub mod metals_live;
