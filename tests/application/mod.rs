mod friendship_service_test;
