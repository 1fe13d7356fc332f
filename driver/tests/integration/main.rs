mod test_sites;
