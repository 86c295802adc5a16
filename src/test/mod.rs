mod config;
mod report;
mod road_network;
mod run;
mod simulator;
mod transient;
