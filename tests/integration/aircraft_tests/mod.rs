mod basic;
mod full;
mod plugin;
