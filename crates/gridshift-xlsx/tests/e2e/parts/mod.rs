mod calc_chain;
mod tables;
