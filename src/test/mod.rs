mod controller;
mod flow_installer;
mod host_table;
mod mac_addr;
mod topology_graph;
